use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::GfResult;
use crate::geo::GeoPoint;
use crate::surface::{RuptureDescriptor, RuptureSurface, SiteDescriptor};

/// A rupture + site pair described in a JSON file; the unit of work every
/// CLI subcommand operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub rupture: RuptureSpec,
    pub site: SiteDescriptor,
}

/// The rupture as a scenario file spells it: a trace plus the dip, width and
/// spacing the gridded surface is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuptureSpec {
    pub mag: f64,
    /// Average rake (degrees); each model maps this to its own category.
    pub rake_deg: f64,
    pub trace: Vec<GeoPoint>,
    pub dip_deg: f64,
    pub width_km: f64,
    #[serde(default = "default_spacing")]
    pub spacing_km: f64,
    #[serde(default)]
    pub hypocenter: Option<GeoPoint>,
    #[serde(default)]
    pub is_aftershock: bool,
}

fn default_spacing() -> f64 {
    1.0
}

impl Scenario {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let content = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    /// Grids the rupture spec into the descriptor the models consume.
    pub fn rupture_descriptor(&self) -> GfResult<RuptureDescriptor> {
        let surface = RuptureSurface::planar(
            &self.rupture.trace,
            self.rupture.dip_deg,
            self.rupture.width_km,
            self.rupture.spacing_km,
        )?;
        tracing::debug!(
            mag = self.rupture.mag,
            rows = surface.rows,
            cols = surface.cols,
            "gridded scenario rupture"
        );
        Ok(RuptureDescriptor {
            mag: self.rupture.mag,
            surface,
            ave_rake: self.rupture.rake_deg,
            hypocenter: self.rupture.hypocenter,
            is_aftershock: self.rupture.is_aftershock,
        })
    }
}
