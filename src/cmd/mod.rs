pub mod curve;
pub mod distances;
pub mod evaluate;
pub mod grid;
pub mod sample;

use groundforge::config::{ResolvedSite, SiteParams};
use groundforge::distance::DistanceSet;
use groundforge::ensemble::MultiModelInputs;
use groundforge::error::GfResult;
use groundforge::geo::GeoPoint;
use groundforge::scenario::Scenario;
use groundforge::surface::RuptureDescriptor;

/// A scenario unpacked into the pieces the subcommands share: the gridded
/// rupture, the site-to-rupture distances, and the merged site condition.
pub struct Prepared {
    pub rupture: RuptureDescriptor,
    pub location: GeoPoint,
    pub distances: DistanceSet,
    pub site: ResolvedSite,
}

pub fn prepare(scenario: &Scenario, site_args: &SiteParams) -> GfResult<Prepared> {
    let rupture = scenario.rupture_descriptor()?;
    let distances = DistanceSet::compute(&rupture.surface, &scenario.site.location);
    let site = site_args.resolve(&scenario.site);
    Ok(Prepared {
        rupture,
        location: scenario.site.location,
        distances,
        site,
    })
}

impl Prepared {
    pub fn combined_inputs(&self) -> MultiModelInputs {
        MultiModelInputs {
            mag: self.rupture.mag,
            rake_deg: self.rupture.ave_rake,
            dip_deg: self.rupture.surface.ave_dip,
            r_rup: self.distances.r_rup,
            r_jb: self.distances.r_jb,
            r_seis: self.distances.r_seis,
            on_hanging_wall: self.distances.hanging_wall,
            hanging_wall_taper: self.distances.hanging_wall_taper,
            vs30: self.site.vs30,
        }
    }
}
