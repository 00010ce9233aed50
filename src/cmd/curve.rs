use clap::Args;
use groundforge::config::Config;
use groundforge::ensemble::MultiModel2004;
use groundforge::error::{GfResult, GroundForgeError};
use groundforge::models::Imt;
use groundforge::scenario::Scenario;

use crate::cmd;
use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Intensity measure for the curve (pga, pgv, sa:<period>).
    #[arg(short, long, default_value = "pga")]
    pub imt: String,

    /// Lowest intensity level (g for PGA/SA, cm/s for PGV).
    #[arg(long, default_value_t = 0.001)]
    pub iml_min: f64,

    /// Highest intensity level.
    #[arg(long, default_value_t = 2.0)]
    pub iml_max: f64,

    /// Number of log-spaced levels.
    #[arg(long, default_value_t = 40)]
    pub points: usize,

    /// Write the curve to this CSV path instead of printing a table.
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &CurveArgs, scenario: &Scenario) -> GfResult<()> {
    let prep = cmd::prepare(scenario, &args.config.site)?;
    let imt: Imt = args.imt.parse()?;
    let ev = &args.config.evaluation;
    let ty = ev.std_dev_type()?;
    let truncation = ev.truncation()?;

    if !(args.iml_min > 0.0 && args.iml_max > args.iml_min) {
        return Err(GroundForgeError::Config(format!(
            "IML range must satisfy 0 < min < max, got {} .. {}",
            args.iml_min, args.iml_max
        )));
    }
    if args.points < 2 {
        return Err(GroundForgeError::Config(
            "need at least 2 curve points".into(),
        ));
    }

    let model = match ev.component()? {
        Some(c) => MultiModel2004::for_component(c)?,
        None => MultiModel2004::new()?,
    };
    let inputs = prep.combined_inputs();

    let lo = args.iml_min.ln();
    let hi = args.iml_max.ln();
    let step = (hi - lo) / (args.points - 1) as f64;
    let levels: Vec<f64> = (0..args.points).map(|i| lo + i as f64 * step).collect();

    let probs = model.exceed_curve(&inputs, imt, &levels, ty, truncation)?;

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(["iml", "exceedProb"])?;
            for (iml_ln, p) in levels.iter().zip(&probs) {
                writer.write_record(&[format!("{:.6e}", iml_ln.exp()), format!("{p:.6e}")])?;
            }
            writer.flush()?;
            println!("💾 Wrote {} curve points to {}", levels.len(), path);
        }
        None => {
            println!("\n📈 === EXCEEDANCE CURVE: {imt} === 📈");
            reports::print_curve_report(&levels, &probs);
        }
    }
    Ok(())
}
