pub mod abrahamson_2000;
pub mod as_1997;
pub mod as_2008;
pub mod bjf_1997;
pub mod cb_2003;
pub mod sadigh_1997;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{GfResult, GroundForgeError};

/// Mean ln value substituted when the site is beyond the configured maximum
/// distance; exp(-35) is effectively zero motion.
pub const VERY_SMALL_MEAN: f64 = -35.0;

/// Intensity measure a model is asked to predict. Spectral acceleration
/// carries its period (seconds); everything else is periodless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Imt {
    Pga,
    Pgv,
    Mmi,
    Sa(f64),
}

impl std::fmt::Display for Imt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Imt::Pga => write!(f, "PGA"),
            Imt::Pgv => write!(f, "PGV"),
            Imt::Mmi => write!(f, "MMI"),
            Imt::Sa(p) => write!(f, "SA ({p} s)"),
        }
    }
}

impl std::str::FromStr for Imt {
    type Err = GroundForgeError;

    /// Accepts `pga`, `pgv`, `mmi`, or `sa:<period>` (e.g. `sa:1.0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pga" => Ok(Imt::Pga),
            "pgv" => Ok(Imt::Pgv),
            "mmi" => Ok(Imt::Mmi),
            other => other
                .strip_prefix("sa:")
                .and_then(|p| p.parse::<f64>().ok())
                .map(Imt::Sa)
                .ok_or_else(|| {
                    GroundForgeError::Config(format!(
                        "'{other}' is not an intensity measure \
                         (options: pga, pgv, mmi, sa:<period>)"
                    ))
                }),
        }
    }
}

/// Ground-motion component the prediction applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum Component {
    AverageHorizontal,
    RandomHorizontal,
    GreaterOfTwoHorizontal,
    Vertical,
    /// Orientation-independent horizontal (Boore et al. 2006), used by the
    /// NGA-generation relations.
    GmRotI50,
}

/// Which standard deviation a model is asked for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum StdDevType {
    Total,
    Inter,
    Intra,
    /// Magnitude-dependent total (where a model defines one).
    TotalMagDep,
    /// PGA-dependent total (where a model defines one).
    TotalPgaDep,
    None,
}

/// One evaluation: ln mean plus the sigmas the model defines. Models without
/// an inter/intra split leave those unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    pub ln_mean: f64,
    pub sigma_total: f64,
    pub sigma_inter: Option<f64>,
    pub sigma_intra: Option<f64>,
}

/// A ground-motion model: maps rupture/site/distance inputs to a lognormal
/// intensity distribution. Implementations keep their coefficient tables
/// internal and read-only; every call passes the looked-up record explicitly.
pub trait ModelEvaluator {
    type Inputs;

    fn name(&self) -> &'static str;

    /// SA periods with coefficients, ascending.
    fn supported_periods(&self) -> Vec<f64>;

    fn mean(&self, inputs: &Self::Inputs, imt: Imt) -> GfResult<f64>;

    fn std_dev(&self, inputs: &Self::Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64>;

    fn evaluate(&self, inputs: &Self::Inputs, imt: Imt) -> GfResult<ModelResult> {
        let ln_mean = self.mean(inputs, imt)?;
        let sigma_total = self.std_dev(inputs, imt, StdDevType::Total)?;
        let sigma_inter = self.std_dev(inputs, imt, StdDevType::Inter).ok();
        let sigma_intra = self.std_dev(inputs, imt, StdDevType::Intra).ok();
        Ok(ModelResult {
            ln_mean,
            sigma_total,
            sigma_inter,
            sigma_intra,
        })
    }
}
