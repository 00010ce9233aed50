use clap::Args;
use groundforge::config::Config;
use groundforge::distance::DistanceSet;
use groundforge::ensemble::{MultiModel2004, MultiModelInputs};
use groundforge::error::{GfResult, GroundForgeError};
use groundforge::geo::GeoPoint;
use groundforge::models::{Imt, ModelEvaluator};
use groundforge::scenario::Scenario;
use rayon::prelude::*;
use std::time::Instant;

use crate::cmd;

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    #[command(flatten)]
    pub config: Config,

    /// Intensity measure mapped over the grid.
    #[arg(short, long, default_value = "pga")]
    pub imt: String,

    /// Half-width of the grid around the trace center (degrees).
    #[arg(long, default_value_t = 1.0)]
    pub span_deg: f64,

    /// Grid node spacing (degrees).
    #[arg(long, default_value_t = 0.05)]
    pub spacing_deg: f64,

    /// Output CSV path.
    #[arg(short, long, default_value = "grid.csv")]
    pub output: String,
}

pub fn run(args: &GridArgs, scenario: &Scenario) -> GfResult<()> {
    let prep = cmd::prepare(scenario, &args.config.site)?;
    let imt: Imt = args.imt.parse()?;
    let ev = &args.config.evaluation;

    if args.span_deg <= 0.0 || args.spacing_deg <= 0.0 {
        return Err(GroundForgeError::Config(format!(
            "span and spacing must be positive, got {} / {}",
            args.span_deg, args.spacing_deg
        )));
    }

    let model = match ev.component()? {
        Some(c) => MultiModel2004::for_component(c)?,
        None => MultiModel2004::new()?,
    };

    let trace = prep.rupture.surface.trace();
    let center_lat = trace.iter().map(|p| p.lat).sum::<f64>() / trace.len() as f64;
    let center_lon = trace.iter().map(|p| p.lon).sum::<f64>() / trace.len() as f64;

    let steps = (2.0 * args.span_deg / args.spacing_deg).round() as usize + 1;
    let mut sites = Vec::with_capacity(steps * steps);
    for i in 0..steps {
        let lat = center_lat - args.span_deg + i as f64 * args.spacing_deg;
        for j in 0..steps {
            let lon = center_lon - args.span_deg + j as f64 * args.spacing_deg;
            sites.push(GeoPoint::surface(lat, lon));
        }
    }

    println!(
        "🗺️  Sweeping {} sites ({steps}x{steps} @ {:.3} deg)",
        sites.len(),
        args.spacing_deg
    );
    let start = Instant::now();

    let rupture = &prep.rupture;
    let surface = &rupture.surface;
    let vs30 = prep.site.vs30;

    let rows: Vec<(f64, f64, f64)> = sites
        .par_iter()
        .map(|site| {
            let d = DistanceSet::compute(surface, site);
            let inputs = MultiModelInputs {
                mag: rupture.mag,
                rake_deg: rupture.ave_rake,
                dip_deg: surface.ave_dip,
                r_rup: d.r_rup,
                r_jb: d.r_jb,
                r_seis: d.r_seis,
                on_hanging_wall: d.hanging_wall,
                hanging_wall_taper: d.hanging_wall_taper,
                vs30,
            };
            let mean = model.mean(&inputs, imt)?;
            Ok((site.lat, site.lon, mean.exp()))
        })
        .collect::<GfResult<Vec<_>>>()?;

    let elapsed = start.elapsed().as_secs_f64();
    println!("⚡ {} evaluations in {elapsed:.2}s", rows.len());

    let mut writer = csv::Writer::from_path(&args.output)?;
    writer.write_record(["lat", "lon", "median"])?;
    for (lat, lon, median) in &rows {
        writer.write_record(&[
            format!("{lat:.5}"),
            format!("{lon:.5}"),
            format!("{median:.6e}"),
        ])?;
    }
    writer.flush()?;
    println!("💾 Wrote {}", args.output);
    Ok(())
}
