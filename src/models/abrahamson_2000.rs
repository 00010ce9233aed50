//! Abrahamson (2000) rupture-directivity variant of Abrahamson & Silva
//! (1997). Strike-slip only, so the style-of-faulting and hanging-wall
//! terms are pinned to zero; the base relation is modified by the
//! Somerville fraction-along-strike x and azimuth theta.

use crate::distance::DirectivityParams;
use crate::error::{GfResult, GroundForgeError};
use crate::table::{CoefficientRecord, CoefficientTable};

use super::as_1997::{self, As1997Record, As1997Site};
use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "Abrahamson-2000";

/// One AS-1997 rock row plus the period-dependent directivity pair. The
/// 0.85 s row of the base relation has no directivity counterpart and is
/// not carried.
#[derive(Debug, Clone, Copy)]
pub struct Ab2000Record {
    pub rock: As1997Record,
    pub c1_dir: f64,
    pub c2_dir: f64,
}

impl CoefficientRecord for Ab2000Record {
    fn period(&self) -> f64 {
        self.rock.period
    }
}

#[derive(Debug, Clone)]
pub struct Ab2000Inputs {
    pub mag: f64,
    pub r_rup: f64,
    pub site: As1997Site,
    pub directivity: DirectivityParams,
}

pub struct Abrahamson2000 {
    table: CoefficientTable<Ab2000Record>,
    max_distance: f64,
}

impl Abrahamson2000 {
    pub fn new() -> Self {
        Abrahamson2000 {
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

    fn record_for(&self, imt: Imt) -> GfResult<&Ab2000Record> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }
}

impl Default for Abrahamson2000 {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance taper on the directivity term: full inside 30 km, ramped out
/// by 60 km.
fn distance_taper(r_rup: f64) -> f64 {
    if r_rup <= 30.0 {
        1.0
    } else if r_rup <= 60.0 {
        1.0 - (r_rup - 30.0) / 30.0
    } else {
        0.0
    }
}

/// Magnitude taper: zero through M 6, full from M 6.5.
fn magnitude_taper(mag: f64) -> f64 {
    if mag <= 6.0 {
        0.0
    } else if mag <= 6.5 {
        1.0 + (mag - 6.5) / 0.5
    } else {
        1.0
    }
}

impl ModelEvaluator for Abrahamson2000 {
    type Inputs = Ab2000Inputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &Ab2000Inputs, imt: Imt) -> GfResult<f64> {
        if inputs.r_rup > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let target = self.record_for(imt)?;

        // strike-slip only: no style term, no hanging wall
        let rock = as_1997::rock_mean(&target.rock, inputs.mag, inputs.r_rup, 0.0, false);
        let base = match inputs.site {
            As1997Site::Rock => rock,
            As1997Site::DeepSoil => {
                let pga_rec = self.table.find_pga()?;
                let rock_pga =
                    as_1997::rock_mean(&pga_rec.rock, inputs.mag, inputs.r_rup, 0.0, false);
                rock + as_1997::soil_amp(&target.rock, rock_pga)
            }
        };

        let cos_theta = inputs.directivity.theta_deg.to_radians().cos();
        let y_dir = if inputs.directivity.x <= 0.4 {
            target.c1_dir + 1.88 * target.c2_dir * inputs.directivity.x * cos_theta
        } else {
            target.c1_dir + 0.75 * target.c2_dir * cos_theta
        };

        Ok(base + y_dir * distance_taper(inputs.r_rup) * magnitude_taper(inputs.mag))
    }

    fn std_dev(&self, inputs: &Ab2000Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        match ty {
            StdDevType::None => Ok(0.0),
            StdDevType::Total => {
                let rec = self.record_for(imt)?;
                // directivity reduces scatter
                Ok(as_1997::sigma(&rec.rock, inputs.mag) - 0.05 * rec.c2_dir / 1.333)
            }
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines a total sigma only, not {other}"
            ))),
        }
    }
}

#[rustfmt::skip]
fn build_table() -> CoefficientTable<Ab2000Record> {
    fn row(period: f64, c4: f64, a1: f64, a3: f64, a5: f64, a6: f64, a9: f64,
           a10: f64, a11: f64, a12: f64, b5: f64, b6: f64,
           c1_dir: f64, c2_dir: f64) -> Ab2000Record {
        Ab2000Record {
            rock: As1997Record { period, c4, a1, a3, a5, a6, a9, a10, a11, a12, b5, b6 },
            c1_dir, c2_dir,
        }
    }
    CoefficientTable::new(NAME, vec![
        row(0.00,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135,  0.0,    0.0),
        row(0.01,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135,  0.0,    0.0),
        row(0.02,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135,  0.0,    0.0),
        row(0.03,  5.6,  1.69,  -1.145,  0.61,   0.26,  0.37,  -0.47,  -0.23,   0.0143,  0.7,  0.135,  0.0,    0.0),
        row(0.04,  5.6,  1.78,  -1.145,  0.61,   0.26,  0.37,  -0.555, -0.251,  0.0245,  0.71, 0.135,  0.0,    0.0),
        row(0.05,  5.6,  1.87,  -1.145,  0.61,   0.26,  0.37,  -0.62,  -0.267,  0.028,   0.71, 0.135,  0.0,    0.0),
        row(0.06,  5.6,  1.94,  -1.145,  0.61,   0.26,  0.37,  -0.665, -0.28,   0.03,    0.72, 0.135,  0.0,    0.0),
        row(0.075, 5.58, 2.037, -1.145,  0.61,   0.26,  0.37,  -0.628, -0.28,   0.03,    0.73, 0.135,  0.0,    0.0),
        row(0.09,  5.54, 2.1,   -1.145,  0.61,   0.26,  0.37,  -0.609, -0.28,   0.03,    0.74, 0.135,  0.0,    0.0),
        row(0.10,  5.5,  2.16,  -1.145,  0.61,   0.26,  0.37,  -0.598, -0.28,   0.028,   0.74, 0.135,  0.0,    0.0),
        row(0.12,  5.39, 2.272, -1.145,  0.61,   0.26,  0.37,  -0.591, -0.28,   0.018,   0.75, 0.135,  0.0,    0.0),
        row(0.15,  5.27, 2.407, -1.145,  0.61,   0.26,  0.37,  -0.577, -0.28,   0.005,   0.75, 0.135,  0.0,    0.0),
        row(0.17,  5.19, 2.43,  -1.135,  0.61,   0.26,  0.37,  -0.522, -0.265, -0.004,   0.76, 0.135,  0.0,    0.0),
        row(0.20,  5.1,  2.406, -1.115,  0.61,   0.26,  0.37,  -0.445, -0.245, -0.0138,  0.77, 0.135,  0.0,    0.0),
        row(0.24,  4.97, 2.293, -1.079,  0.61,   0.232, 0.37,  -0.35,  -0.223, -0.0238,  0.77, 0.135,  0.0,    0.0),
        row(0.30,  4.8,  2.114, -1.035,  0.61,   0.198, 0.37,  -0.219, -0.195, -0.036,   0.78, 0.135,  0.0,    0.0),
        row(0.36,  4.62, 1.955, -1.0052, 0.61,   0.17,  0.37,  -0.123, -0.173, -0.046,   0.79, 0.135,  0.0,    0.0),
        row(0.40,  4.52, 1.86,  -0.988,  0.61,   0.154, 0.37,  -0.065, -0.16,  -0.0518,  0.79, 0.135,  0.0,    0.0),
        row(0.46,  4.38, 1.717, -0.9652, 0.592,  0.132, 0.37,   0.02,  -0.136, -0.0594,  0.8,  0.132,  0.0,    0.0),
        row(0.50,  4.3,  1.615, -0.9515, 0.581,  0.119, 0.37,   0.085, -0.121, -0.0635,  0.8,  0.13,   0.0,    0.0),
        row(0.60,  4.12, 1.428, -0.9218, 0.557,  0.091, 0.37,   0.194, -0.089, -0.074,   0.81, 0.127,  0.0,    0.0),
        row(0.75,  3.9,  1.16,  -0.8852, 0.528,  0.057, 0.331,  0.32,  -0.05,  -0.0862,  0.81, 0.123, -0.084,  0.185),
        row(1.00,  3.7,  0.828, -0.8383, 0.49,   0.013, 0.281,  0.423,  0.0,   -0.102,   0.83, 0.118, -0.192,  0.423),
        row(1.50,  3.55, 0.26,  -0.7721, 0.438, -0.049, 0.21,   0.6,    0.04,  -0.12,    0.84, 0.11,  -0.344,  0.759),
        row(2.00,  3.5, -0.15,  -0.725,  0.4,   -0.094, 0.16,   0.61,   0.04,  -0.14,    0.85, 0.105, -0.452,  0.998),
        row(3.00,  3.5, -0.69,  -0.725,  0.4,   -0.156, 0.089,  0.63,   0.04,  -0.1726,  0.87, 0.097, -0.605,  1.333),
        row(4.00,  3.5, -1.13,  -0.725,  0.4,   -0.2,   0.039,  0.64,   0.04,  -0.1956,  0.88, 0.092, -0.713,  1.571),
        row(5.00,  3.5, -1.46,  -0.725,  0.4,   -0.2,   0.0,    0.664,  0.04,  -0.215,   0.89, 0.087, -0.797,  1.757),
    ])
}
