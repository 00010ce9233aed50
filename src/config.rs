use clap::Args;
use strum::IntoEnumIterator;

use crate::error::{GfResult, GroundForgeError};
use crate::models::{Component, StdDevType};
use crate::prob::SigmaTruncation;
use crate::surface::SiteDescriptor;

/// Reference vs30 (m/s) assumed when neither the CLI nor the scenario file
/// supplies one; the NEHRP B/C boundary.
pub const DEFAULT_VS30: f64 = 760.0;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub evaluation: EvaluationParams,
    #[command(flatten)]
    pub site: SiteParams,
}

#[derive(Args, Debug, Clone)]
pub struct EvaluationParams {
    /// Ground-motion component (average_horizontal, random_horizontal,
    /// greater_of_two_horizontal, vertical, gm_rot_i50). Defaults to each
    /// model's native component.
    #[arg(long)]
    pub component: Option<String>,

    /// Standard deviation type (total, inter, intra, total_mag_dep,
    /// total_pga_dep, none).
    #[arg(long, default_value = "total")]
    pub std_dev_type: String,

    /// Sigma truncation for exceedance probabilities (none, one_sided,
    /// two_sided).
    #[arg(long, default_value = "none")]
    pub sigma_trunc_type: String,

    /// Truncation level, units of sigma.
    #[arg(long, default_value_t = 3.0)]
    pub sigma_trunc_level: f64,

    /// Ruptures farther than this (km) evaluate to effectively zero motion.
    #[arg(long)]
    pub max_distance: Option<f64>,
}

impl EvaluationParams {
    pub fn component(&self) -> GfResult<Option<Component>> {
        self.component
            .as_deref()
            .map(|s| parse_enum_arg(s, "component"))
            .transpose()
    }

    pub fn std_dev_type(&self) -> GfResult<StdDevType> {
        parse_enum_arg(&self.std_dev_type, "std-dev-type")
    }

    pub fn truncation(&self) -> GfResult<SigmaTruncation> {
        let trunc = match self.sigma_trunc_type.as_str() {
            "none" => SigmaTruncation::None,
            "one_sided" => SigmaTruncation::OneSided(self.sigma_trunc_level),
            "two_sided" => SigmaTruncation::TwoSided(self.sigma_trunc_level),
            other => {
                return Err(GroundForgeError::Config(format!(
                    "--sigma-trunc-type '{other}' is not recognized \
                     (options: none, one_sided, two_sided)"
                )))
            }
        };
        trunc.validated()
    }
}

#[derive(Args, Debug, Clone)]
pub struct SiteParams {
    /// Site vs30 (m/s); overrides the scenario value, 760 when neither sets
    /// one.
    #[arg(long)]
    pub vs30: Option<f64>,

    /// Treat vs30 as measured rather than inferred.
    #[arg(long, default_value_t = false)]
    pub vs30_measured: bool,

    /// Depth to the 1.0 km/s velocity horizon (m); overrides the scenario
    /// value.
    #[arg(long)]
    pub depth_1p0: Option<f64>,
}

/// Site condition after layering CLI flags over the scenario file.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSite {
    pub vs30: f64,
    pub vs30_measured: bool,
    pub depth_1p0_m: Option<f64>,
}

impl SiteParams {
    pub fn resolve(&self, site: &SiteDescriptor) -> ResolvedSite {
        ResolvedSite {
            vs30: self.vs30.or(site.vs30).unwrap_or(DEFAULT_VS30),
            vs30_measured: self.vs30_measured || site.vs30_measured,
            depth_1p0_m: self.depth_1p0.or(site.depth_1p0_m),
        }
    }
}

fn parse_enum_arg<T>(value: &str, name: &str) -> GfResult<T>
where
    T: std::str::FromStr + IntoEnumIterator + std::fmt::Display,
{
    value.parse().map_err(|_| {
        let options = T::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        GroundForgeError::Config(format!(
            "--{name} '{value}' is not recognized (options: {options})"
        ))
    })
}
