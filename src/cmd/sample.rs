use clap::Args;
use groundforge::config::Config;
use groundforge::ensemble::MultiModel2004;
use groundforge::error::{GfResult, GroundForgeError};
use groundforge::models::{Imt, ModelEvaluator};
use groundforge::prob::SigmaTruncation;
use groundforge::scenario::Scenario;

use crate::cmd;
use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[command(flatten)]
    pub config: Config,

    /// Intensity measure to sample.
    #[arg(short, long, default_value = "pga")]
    pub imt: String,

    /// Number of realizations.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub draws: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: &SampleArgs, scenario: &Scenario) -> GfResult<()> {
    let prep = cmd::prepare(scenario, &args.config.site)?;
    let imt: Imt = args.imt.parse()?;
    let ev = &args.config.evaluation;
    let ty = ev.std_dev_type()?;
    let truncation = ev.truncation()?;
    if args.draws == 0 {
        return Err(GroundForgeError::Config(
            "--draws must be at least 1".into(),
        ));
    }

    let model = match ev.component()? {
        Some(c) => MultiModel2004::for_component(c)?,
        None => MultiModel2004::new()?,
    };
    let inputs = prep.combined_inputs();
    let mean = model.mean(&inputs, imt)?;
    let sigma = model.std_dev(&inputs, imt, ty)?;

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    println!(
        "\n🎲 Sampling {} realizations of {imt} (ln mean {mean:.4}, sigma {sigma:.4})",
        args.draws
    );

    let mut draws: Vec<f64> = (0..args.draws)
        .map(|_| (mean + sigma * truncated_normal(&mut rng, truncation)).exp())
        .collect();
    draws.sort_by(f64::total_cmp);

    reports::print_sample_report(imt, &draws);
    Ok(())
}

/// Standard normal via Box-Muller, redrawn until it clears the configured
/// truncation.
fn truncated_normal(rng: &mut fastrand::Rng, truncation: SigmaTruncation) -> f64 {
    loop {
        let u1 = 1.0 - rng.f64();
        let u2 = rng.f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        match truncation {
            SigmaTruncation::None => return z,
            SigmaTruncation::OneSided(l) if z <= l => return z,
            SigmaTruncation::TwoSided(l) if z.abs() <= l => return z,
            _ => {}
        }
    }
}
