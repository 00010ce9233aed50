//! Sadigh, Chang, Egan, Makdisi & Youngs (1997). Rupture distance, rock vs
//! deep soil, magnitude-saturating near field.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{GfResult, GroundForgeError};
use crate::table::{CoefficientRecord, CoefficientTable};

use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "Sadigh-1997";

// Rock constants, split at M 6.5.
const C2_RLT: f64 = 1.0;
const C2_RGT: f64 = 1.1;
const C5_RLT: f64 = 1.29649;
const C5_RGT: f64 = -0.48451;
const C6_RLT: f64 = 0.250;
const C6_RGT: f64 = 0.524;

// Deep-soil constants.
const C1_S_SS: f64 = -2.17;
const C1_S_RV: f64 = -1.92;
const C2_S: f64 = 1.0;
const C3_S: f64 = 1.7;
const C4_SLT: f64 = 2.1863;
const C4_SGT: f64 = 0.3825;
const C5_SLT: f64 = 0.32;
const C5_SGT: f64 = 0.5882;

/// ln(1.2), the reverse-faulting scale on rock.
const ROCK_REVERSE_LN: f64 = 0.1823;

#[derive(Debug, Clone, Copy)]
pub struct SadighRecord {
    pub period: f64,
    pub c1_rlt: f64,
    pub c1_rgt: f64,
    pub c3: f64,
    pub c4: f64,
    pub c7_r: f64,
    pub c6_s_ss: f64,
    pub c6_s_rv: f64,
    pub c7_s: f64,
    pub sigma_ri: f64,
    pub sigma_si: f64,
}

impl CoefficientRecord for SadighRecord {
    fn period(&self) -> f64 {
        self.period
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SadighFault {
    Reverse,
    Other,
}

impl SadighFault {
    pub fn from_rake(rake: f64) -> Self {
        if rake > 45.0 && rake < 135.0 {
            SadighFault::Reverse
        } else {
            SadighFault::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SadighSite {
    Rock,
    DeepSoil,
}

#[derive(Debug, Clone)]
pub struct SadighInputs {
    pub mag: f64,
    pub r_rup: f64,
    pub fault: SadighFault,
    pub site: SadighSite,
}

pub struct Sadigh1997 {
    table: CoefficientTable<SadighRecord>,
    max_distance: f64,
}

impl Sadigh1997 {
    pub fn new() -> Self {
        Sadigh1997 {
            table: build_table(),
            max_distance: f64::MAX,
        }
    }

    pub fn for_component(component: Component) -> GfResult<Self> {
        if component != Component::AverageHorizontal {
            return Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} supports the average_horizontal component only, got {component}"
            )));
        }
        Ok(Self::new())
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance = km;
        self
    }

    fn record_for(&self, imt: Imt) -> GfResult<&SadighRecord> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }
}

impl Default for Sadigh1997 {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelEvaluator for Sadigh1997 {
    type Inputs = SadighInputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &SadighInputs, imt: Imt) -> GfResult<f64> {
        if inputs.r_rup > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let rec = self.record_for(imt)?;
        let mag = inputs.mag;
        let d = inputs.r_rup;
        let sat = (8.5 - mag).powf(2.5);
        let mean = match inputs.site {
            SadighSite::Rock => {
                let base = if mag <= 6.5 {
                    rec.c1_rlt
                        + C2_RLT * mag
                        + rec.c3 * sat
                        + rec.c4 * (d + (C5_RLT + C6_RLT * mag).exp()).ln()
                        + rec.c7_r * (d + 2.0).ln()
                } else {
                    rec.c1_rgt
                        + C2_RGT * mag
                        + rec.c3 * sat
                        + rec.c4 * (d + (C5_RGT + C6_RGT * mag).exp()).ln()
                        + rec.c7_r * (d + 2.0).ln()
                };
                if inputs.fault == SadighFault::Reverse {
                    base + ROCK_REVERSE_LN
                } else {
                    base
                }
            }
            SadighSite::DeepSoil => {
                let c4s = if mag <= 6.5 { C4_SLT } else { C4_SGT };
                let c5s = if mag <= 6.5 { C5_SLT } else { C5_SGT };
                let base = C2_S * mag - C3_S * (d + c4s * (c5s * mag).exp()).ln() + rec.c7_s * sat;
                match inputs.fault {
                    SadighFault::Reverse => base + C1_S_RV + rec.c6_s_rv,
                    SadighFault::Other => base + C1_S_SS + rec.c6_s_ss,
                }
            }
        };
        Ok(mean)
    }

    fn std_dev(&self, inputs: &SadighInputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        match ty {
            StdDevType::None => Ok(0.0),
            StdDevType::Total => {
                let rec = self.record_for(imt)?;
                let mag = inputs.mag;
                let sigma = match inputs.site {
                    // floors are the line values at M 7.21 and 7.0
                    SadighSite::Rock => {
                        if mag <= 7.21 {
                            rec.sigma_ri - mag * 0.14
                        } else {
                            rec.sigma_ri - 1.01
                        }
                    }
                    SadighSite::DeepSoil => {
                        if mag <= 7.0 {
                            rec.sigma_si - mag * 0.16
                        } else {
                            rec.sigma_si - 1.12
                        }
                    }
                };
                Ok(sigma)
            }
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines a total sigma only, got {other}"
            ))),
        }
    }
}

#[rustfmt::skip]
fn build_table() -> CoefficientTable<SadighRecord> {
    fn row(period: f64, c1_rlt: f64, c1_rgt: f64, c3: f64, c4: f64, c7_r: f64,
           c6_s_ss: f64, c6_s_rv: f64, c7_s: f64, sigma_ri: f64, sigma_si: f64) -> SadighRecord {
        SadighRecord { period, c1_rlt, c1_rgt, c3, c4, c7_r,
                       c6_s_ss, c6_s_rv, c7_s, sigma_ri, sigma_si }
    }
    CoefficientTable::new(NAME, vec![
        row(0.000, -0.624, -1.274,  0.000, -2.100,  0.000,  0.0,     0.0,     0.000, 1.39, 1.52),
        row(0.075,  0.110, -0.540,  0.006, -2.128, -0.082,  0.4572,  0.4572,  0.005, 1.40, 1.54),
        row(0.100,  0.275, -0.375,  0.006, -2.148, -0.041,  0.6395,  0.6395,  0.005, 1.41, 1.54),
        row(0.200,  0.153, -0.497, -0.004, -2.080,  0.000,  0.9187,  0.9187, -0.004, 1.43, 1.565),
        row(0.300, -0.057, -0.707, -0.017, -2.028,  0.000,  0.9547,  0.9547, -0.014, 1.45, 1.58),
        row(0.400, -0.298, -0.948, -0.028, -1.990,  0.000,  0.9251,  0.9005, -0.024, 1.48, 1.595),
        row(0.500, -0.588, -1.238, -0.040, -1.945,  0.000,  0.8494,  0.8285, -0.033, 1.50, 1.61),
        row(0.750, -1.208, -1.858, -0.050, -1.865,  0.000,  0.7010,  0.6802, -0.051, 1.52, 1.635),
        row(1.000, -1.705, -2.355, -0.055, -1.800,  0.000,  0.5665,  0.5075, -0.065, 1.53, 1.66),
        row(1.500, -2.407, -3.057, -0.065, -1.725,  0.000,  0.3235,  0.2215, -0.090, 1.53, 1.69),
        row(2.000, -2.945, -3.595, -0.070, -1.670,  0.000,  0.1001, -0.0526, -0.108, 1.53, 1.70),
        row(3.000, -3.700, -4.350, -0.080, -1.610,  0.000, -0.2801, -0.4905, -0.139, 1.53, 1.71),
        row(4.000, -4.230, -4.880, -0.100, -1.570,  0.000, -0.6274, -0.8907, -0.160, 1.53, 1.71),
    ])
}
