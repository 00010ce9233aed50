use clap::Args;
use groundforge::config::Config;
use groundforge::distance;
use groundforge::ensemble::MultiModel2004;
use groundforge::error::{GfResult, GroundForgeError};
use groundforge::models::abrahamson_2000::{Ab2000Inputs, Abrahamson2000};
use groundforge::models::as_1997::{As1997, As1997Fault, As1997Inputs, As1997Site};
use groundforge::models::as_2008::{As2008, As2008Fault, As2008Inputs};
use groundforge::models::bjf_1997::{Bjf1997, Bjf1997Fault, Bjf1997Inputs};
use groundforge::models::cb_2003::{Cb2003, Cb2003Fault, Cb2003Inputs, Cb2003Site};
use groundforge::models::sadigh_1997::{Sadigh1997, SadighFault, SadighInputs, SadighSite};
use groundforge::models::{Imt, ModelEvaluator, StdDevType};
use groundforge::prob::{self, SigmaTruncation};
use groundforge::scenario::Scenario;

use crate::cmd::{self, Prepared};
use crate::reports::{self, EvalCells, EvalRow};

const MODEL_NAMES: [&str; 7] = [
    "combined",
    "as_1997",
    "bjf_1997",
    "sadigh_1997",
    "cb_2003",
    "abrahamson_2000",
    "as_2008",
];

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Comma-separated model list, or "all": combined, as_1997, bjf_1997,
    /// sadigh_1997, cb_2003, abrahamson_2000, as_2008.
    #[arg(short, long, default_value = "combined")]
    pub models: String,

    /// Comma-separated intensity measures (pga, pgv, mmi, sa:<period>).
    #[arg(short, long, default_value = "pga,sa:0.3,sa:1.0")]
    pub imts: String,

    /// Intensity level for an exceedance-probability column (g for PGA/SA,
    /// cm/s for PGV).
    #[arg(long)]
    pub iml: Option<f64>,
}

pub fn run(args: &EvaluateArgs, scenario: &Scenario) -> GfResult<()> {
    let prep = cmd::prepare(scenario, &args.config.site)?;
    let models = parse_models(&args.models)?;
    let imts = parse_imts(&args.imts)?;
    if let Some(iml) = args.iml {
        if iml <= 0.0 {
            return Err(GroundForgeError::Config(format!(
                "--iml must be positive, got {iml}"
            )));
        }
    }

    println!("\n📊 === GROUND MOTION === 📊");
    println!(
        "M{:.1} rupture | rRup {:.1} km | rJB {:.1} km | vs30 {:.0} m/s",
        prep.rupture.mag, prep.distances.r_rup, prep.distances.r_jb, prep.site.vs30
    );

    let mut rows = Vec::with_capacity(models.len() * imts.len());
    for &model in &models {
        for &imt in &imts {
            let outcome = evaluate_one(model, &prep, imt, args).map_err(|e| e.to_string());
            rows.push(EvalRow {
                model,
                imt: imt.to_string(),
                outcome,
            });
        }
    }

    reports::print_evaluation_report(&rows, args.iml);
    Ok(())
}

fn parse_models(list: &str) -> GfResult<Vec<&'static str>> {
    if list == "all" {
        return Ok(MODEL_NAMES.to_vec());
    }
    let mut out = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let canonical = MODEL_NAMES.iter().find(|m| **m == name).ok_or_else(|| {
            GroundForgeError::Config(format!(
                "unknown model '{name}' (options: all, {})",
                MODEL_NAMES.join(", ")
            ))
        })?;
        out.push(*canonical);
    }
    if out.is_empty() {
        return Err(GroundForgeError::Config("no models given".into()));
    }
    Ok(out)
}

fn parse_imts(list: &str) -> GfResult<Vec<Imt>> {
    let mut out = Vec::new();
    for token in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        out.push(token.parse()?);
    }
    if out.is_empty() {
        return Err(GroundForgeError::Config(
            "no intensity measures given".into(),
        ));
    }
    Ok(out)
}

/// One (model, IMT) cell set. Every model is evaluated fresh from the shared
/// scenario pieces; errors surface as table rows rather than aborting the
/// whole audit.
fn evaluate_one(name: &str, prep: &Prepared, imt: Imt, args: &EvaluateArgs) -> GfResult<EvalCells> {
    let ev = &args.config.evaluation;
    let component = ev.component()?;
    let ty = ev.std_dev_type()?;
    let truncation = ev.truncation()?;
    let iml_ln = args.iml.map(f64::ln);

    let rupture = &prep.rupture;
    let d = &prep.distances;

    let (mean, sigma, exceed) = match name {
        "combined" => {
            let model = match component {
                Some(c) => MultiModel2004::for_component(c)?,
                None => MultiModel2004::new()?,
            };
            let inputs = prep.combined_inputs();
            let mean = model.mean(&inputs, imt)?;
            let sigma = model.std_dev(&inputs, imt, ty)?;
            let exceed = match iml_ln {
                Some(iml) => Some(model.exceed_prob(&inputs, imt, iml, ty, truncation)?),
                None => None,
            };
            (mean, sigma, exceed)
        }
        "as_1997" => {
            let mut model = match component {
                Some(c) => As1997::for_component(c)?,
                None => As1997::new(),
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let inputs = As1997Inputs {
                mag: rupture.mag,
                r_rup: d.r_rup,
                fault: As1997Fault::from_rake(rupture.ave_rake),
                site: As1997Site::Rock,
                on_hanging_wall: d.hanging_wall,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        "bjf_1997" => {
            let mut model = match component {
                Some(c) => Bjf1997::for_component(c)?,
                None => Bjf1997::new(),
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let inputs = Bjf1997Inputs {
                mag: rupture.mag,
                r_jb: d.r_jb,
                fault: Bjf1997Fault::from_rake(rupture.ave_rake),
                vs30: prep.site.vs30,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        "sadigh_1997" => {
            let mut model = match component {
                Some(c) => Sadigh1997::for_component(c)?,
                None => Sadigh1997::new(),
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let inputs = SadighInputs {
                mag: rupture.mag,
                r_rup: d.r_rup,
                fault: SadighFault::from_rake(rupture.ave_rake),
                site: SadighSite::Rock,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        "cb_2003" => {
            let mut model = match component {
                Some(c) => Cb2003::for_component(c)?,
                None => Cb2003::new(),
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let inputs = Cb2003Inputs {
                mag: rupture.mag,
                r_seis: d.r_seis,
                hanging_wall_taper: d.hanging_wall_taper,
                fault: Cb2003Fault::from_rake_dip(rupture.ave_rake, rupture.surface.ave_dip),
                site: Cb2003Site::NehrpBc,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        "abrahamson_2000" => {
            let mut model = match component {
                Some(c) => Abrahamson2000::for_component(c)?,
                None => Abrahamson2000::new(),
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let directivity = distance::directivity_for(rupture, &prep.location)?;
            let inputs = Ab2000Inputs {
                mag: rupture.mag,
                r_rup: d.r_rup,
                site: As1997Site::Rock,
                directivity,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        "as_2008" => {
            let mut model = match component {
                Some(c) => As2008::for_component(c)?,
                None => As2008::new()?,
            };
            if let Some(km) = ev.max_distance {
                model = model.with_max_distance(km);
            }
            let inputs = As2008Inputs {
                mag: rupture.mag,
                r_rup: d.r_rup,
                rup_minus_jb_over_rup: d.rup_minus_jb_over_rup,
                rup_minus_x_over_rup: d.rup_minus_x_over_rup,
                on_hanging_wall_side: d.x_side_hanging_wall(),
                fault: As2008Fault::from_rake(rupture.ave_rake),
                is_aftershock: rupture.is_aftershock,
                dip_deg: rupture.surface.ave_dip,
                rup_width_km: rupture.surface.surface_width(),
                depth_top_km: rupture.surface.top_depth(),
                vs30: prep.site.vs30,
                vs30_measured: prep.site.vs30_measured,
                depth_1p0_m: prep.site.depth_1p0_m,
            };
            distribution(&model, &inputs, imt, ty, iml_ln, truncation)?
        }
        other => {
            return Err(GroundForgeError::Config(format!("unknown model '{other}'")));
        }
    };

    Ok(EvalCells {
        median: mean.exp(),
        ln_mean: mean,
        sigma,
        exceed,
    })
}

fn distribution<M: ModelEvaluator>(
    model: &M,
    inputs: &M::Inputs,
    imt: Imt,
    ty: StdDevType,
    iml_ln: Option<f64>,
    truncation: SigmaTruncation,
) -> GfResult<(f64, f64, Option<f64>)> {
    let mean = model.mean(inputs, imt)?;
    let sigma = model.std_dev(inputs, imt, ty)?;
    let exceed = iml_ln.map(|iml| prob::exceed_prob_for(mean, sigma, iml, truncation));
    Ok((mean, sigma, exceed))
}
