use clap::Args;
use groundforge::distance::{self, DistanceSet};
use groundforge::error::GfResult;
use groundforge::scenario::Scenario;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct DistancesArgs {}

pub fn run(_args: &DistancesArgs, scenario: &Scenario) -> GfResult<()> {
    let rupture = scenario.rupture_descriptor()?;
    let distances = DistanceSet::compute(&rupture.surface, &scenario.site.location);

    println!("\n📐 === RUPTURE GEOMETRY === 📐");
    reports::print_rupture_summary(&rupture);

    let directivity = match rupture.hypocenter {
        Some(hyp) => {
            match distance::directivity(&rupture.surface, &hyp, &scenario.site.location) {
                Ok(d) => Some(d),
                Err(e) => {
                    println!("⚠️  Directivity unavailable: {e}");
                    None
                }
            }
        }
        None => None,
    };

    reports::print_distance_report(&distances, directivity.as_ref());
    Ok(())
}
