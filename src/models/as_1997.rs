//! Abrahamson & Silva (1997) attenuation relationship, average horizontal
//! component, rock and deep-soil sites.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{GfResult, GroundForgeError};
use crate::table::{CoefficientRecord, CoefficientTable};

use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "AS-1997";

// period-independent constants, average horizontal component
const A2: f64 = 0.512;
const A4: f64 = -0.144;
const A13: f64 = 0.17;
const C1: f64 = 6.4;
const C5: f64 = 0.03;
const N: i32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct As1997Record {
    pub period: f64,
    pub c4: f64,
    pub a1: f64,
    pub a3: f64,
    pub a5: f64,
    pub a6: f64,
    pub a9: f64,
    pub a10: f64,
    pub a11: f64,
    pub a12: f64,
    pub b5: f64,
    pub b6: f64,
}

impl CoefficientRecord for As1997Record {
    fn period(&self) -> f64 {
        self.period
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum As1997Fault {
    Reverse,
    ReverseOblique,
    Other,
}

impl As1997Fault {
    /// Reverse within 22.5 degrees of pure dip-slip, reverse-oblique out to
    /// 22.5 degrees of strike-slip, everything else (strike-slip and normal)
    /// unclassified.
    pub fn from_rake(rake: f64) -> Self {
        if (67.5..=112.5).contains(&rake) {
            As1997Fault::Reverse
        } else if (22.5..67.5).contains(&rake) || (rake > 112.5 && rake <= 157.5) {
            As1997Fault::ReverseOblique
        } else {
            As1997Fault::Other
        }
    }

    /// Style-of-faulting weight F applied to f3.
    pub fn style_weight(self) -> f64 {
        match self {
            As1997Fault::Reverse => 1.0,
            As1997Fault::ReverseOblique => 0.5,
            As1997Fault::Other => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum As1997Site {
    Rock,
    DeepSoil,
}

#[derive(Debug, Clone)]
pub struct As1997Inputs {
    pub mag: f64,
    pub r_rup: f64,
    pub fault: As1997Fault,
    pub site: As1997Site,
    /// Hanging-wall polygon flag (dip- and point-source-suppressed).
    pub on_hanging_wall: bool,
}

pub struct As1997 {
    table: CoefficientTable<As1997Record>,
    max_distance: f64,
}

impl As1997 {
    pub fn new() -> Self {
        As1997 {
            table: build_table(),
            max_distance: f64::MAX,
        }
    }

    /// Only the average horizontal component is carried here.
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

    pub(crate) fn table(&self) -> &CoefficientTable<As1997Record> {
        &self.table
    }

    fn record_for(&self, imt: Imt) -> GfResult<&As1997Record> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }
}

impl Default for As1997 {
    fn default() -> Self {
        Self::new()
    }
}

/// Rock-site ln mean for one coefficient record. The record is passed in
/// explicitly so the two-phase soil path (PGA record first, target record
/// second) stays visible at the call site.
pub fn rock_mean(
    rec: &As1997Record,
    mag: f64,
    r_rup: f64,
    style_weight: f64,
    on_hanging_wall: bool,
) -> f64 {
    let r = (r_rup * r_rup + rec.c4 * rec.c4).sqrt();

    let slope = if mag <= C1 { A2 } else { A4 };
    let f1 = rec.a1
        + slope * (mag - C1)
        + rec.a12 * (8.5 - mag).powi(N)
        + r.ln() * (rec.a3 + A13 * (mag - C1));

    let f3 = if mag <= 5.8 {
        rec.a5
    } else if mag < C1 {
        rec.a5 + (rec.a6 - rec.a5) * (mag - 5.8) / (C1 - 5.8)
    } else {
        rec.a6
    };

    if !on_hanging_wall {
        return f1 + style_weight * f3;
    }

    let f_hw_m = if mag <= 5.5 {
        0.0
    } else if mag < 6.5 {
        mag - 5.5
    } else {
        1.0
    };
    let f_hw_r = if r_rup <= 4.0 {
        0.0
    } else if r_rup <= 8.0 {
        rec.a9 * (r_rup - 4.0) / 4.0
    } else if r_rup <= 18.0 {
        rec.a9
    } else if r_rup <= 25.0 {
        rec.a9 * (1.0 - (r_rup - 18.0) / 7.0)
    } else {
        0.0
    };

    f1 + style_weight * f3 + f_hw_m * f_hw_r
}

/// Deep-soil site response f5 for one record, given the rock PGA ln mean.
pub fn soil_amp(rec: &As1997Record, rock_pga_ln: f64) -> f64 {
    rec.a10 + rec.a11 * (rock_pga_ln.exp() + C5).ln()
}

/// Magnitude-dependent total sigma for one record.
pub fn sigma(rec: &As1997Record, mag: f64) -> f64 {
    if mag <= 5.0 {
        rec.b5
    } else if mag < 7.0 {
        rec.b5 - rec.b6 * (mag - 5.0)
    } else {
        rec.b5 - 2.0 * rec.b6
    }
}

impl ModelEvaluator for As1997 {
    type Inputs = As1997Inputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &As1997Inputs, imt: Imt) -> GfResult<f64> {
        if inputs.r_rup > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let target = self.record_for(imt)?;
        let f = inputs.fault.style_weight();
        let rock = rock_mean(target, inputs.mag, inputs.r_rup, f, inputs.on_hanging_wall);

        match inputs.site {
            As1997Site::Rock => Ok(rock),
            As1997Site::DeepSoil => {
                let pga_rec = self.table.find_pga()?;
                let rock_pga =
                    rock_mean(pga_rec, inputs.mag, inputs.r_rup, f, inputs.on_hanging_wall);
                Ok(rock + soil_amp(target, rock_pga))
            }
        }
    }

    fn std_dev(&self, inputs: &As1997Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        match ty {
            StdDevType::None => Ok(0.0),
            StdDevType::Total => {
                let rec = self.record_for(imt)?;
                Ok(sigma(rec, inputs.mag))
            }
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines a total sigma only, not {other}"
            ))),
        }
    }
}

#[rustfmt::skip]
fn build_table() -> CoefficientTable<As1997Record> {
    fn row(period: f64, c4: f64, a1: f64, a3: f64, a5: f64, a6: f64, a9: f64,
           a10: f64, a11: f64, a12: f64, b5: f64, b6: f64) -> As1997Record {
        As1997Record { period, c4, a1, a3, a5, a6, a9, a10, a11, a12, b5, b6 }
    }
    CoefficientTable::new(NAME, vec![
        row(0.00,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135),
        row(0.01,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135),
        row(0.02,  5.6,  1.64,  -1.145,  0.61,   0.26,  0.37,  -0.417, -0.23,   0.0,     0.7,  0.135),
        row(0.03,  5.6,  1.69,  -1.145,  0.61,   0.26,  0.37,  -0.47,  -0.23,   0.0143,  0.7,  0.135),
        row(0.04,  5.6,  1.78,  -1.145,  0.61,   0.26,  0.37,  -0.555, -0.251,  0.0245,  0.71, 0.135),
        row(0.05,  5.6,  1.87,  -1.145,  0.61,   0.26,  0.37,  -0.62,  -0.267,  0.028,   0.71, 0.135),
        row(0.06,  5.6,  1.94,  -1.145,  0.61,   0.26,  0.37,  -0.665, -0.28,   0.03,    0.72, 0.135),
        row(0.075, 5.58, 2.037, -1.145,  0.61,   0.26,  0.37,  -0.628, -0.28,   0.03,    0.73, 0.135),
        row(0.09,  5.54, 2.1,   -1.145,  0.61,   0.26,  0.37,  -0.609, -0.28,   0.03,    0.74, 0.135),
        row(0.10,  5.5,  2.16,  -1.145,  0.61,   0.26,  0.37,  -0.598, -0.28,   0.028,   0.74, 0.135),
        row(0.12,  5.39, 2.272, -1.145,  0.61,   0.26,  0.37,  -0.591, -0.28,   0.018,   0.75, 0.135),
        row(0.15,  5.27, 2.407, -1.145,  0.61,   0.26,  0.37,  -0.577, -0.28,   0.005,   0.75, 0.135),
        row(0.17,  5.19, 2.43,  -1.135,  0.61,   0.26,  0.37,  -0.522, -0.265, -0.004,   0.76, 0.135),
        row(0.20,  5.1,  2.406, -1.115,  0.61,   0.26,  0.37,  -0.445, -0.245, -0.0138,  0.77, 0.135),
        row(0.24,  4.97, 2.293, -1.079,  0.61,   0.232, 0.37,  -0.35,  -0.223, -0.0238,  0.77, 0.135),
        row(0.30,  4.8,  2.114, -1.035,  0.61,   0.198, 0.37,  -0.219, -0.195, -0.036,   0.78, 0.135),
        row(0.36,  4.62, 1.955, -1.0052, 0.61,   0.17,  0.37,  -0.123, -0.173, -0.046,   0.79, 0.135),
        row(0.40,  4.52, 1.86,  -0.988,  0.61,   0.154, 0.37,  -0.065, -0.16,  -0.0518,  0.79, 0.135),
        row(0.46,  4.38, 1.717, -0.9652, 0.592,  0.132, 0.37,   0.02,  -0.136, -0.0594,  0.8,  0.132),
        row(0.50,  4.3,  1.615, -0.9515, 0.581,  0.119, 0.37,   0.085, -0.121, -0.0635,  0.8,  0.13),
        row(0.60,  4.12, 1.428, -0.9218, 0.557,  0.091, 0.37,   0.194, -0.089, -0.074,   0.81, 0.127),
        row(0.75,  3.9,  1.16,  -0.8852, 0.528,  0.057, 0.331,  0.32,  -0.05,  -0.0862,  0.81, 0.123),
        row(0.85,  3.81, 1.02,  -0.8648, 0.512,  0.038, 0.309,  0.37,  -0.028, -0.0927,  0.82, 0.121),
        row(1.00,  3.7,  0.828, -0.8383, 0.49,   0.013, 0.281,  0.423,  0.0,   -0.102,   0.83, 0.118),
        row(1.50,  3.55, 0.26,  -0.7721, 0.438, -0.049, 0.21,   0.6,    0.04,  -0.12,    0.84, 0.11),
        row(2.00,  3.5, -0.15,  -0.725,  0.4,   -0.094, 0.16,   0.61,   0.04,  -0.14,    0.85, 0.105),
        row(3.00,  3.5, -0.69,  -0.725,  0.4,   -0.156, 0.089,  0.63,   0.04,  -0.1726,  0.87, 0.097),
        row(4.00,  3.5, -1.13,  -0.725,  0.4,   -0.2,   0.039,  0.64,   0.04,  -0.1956,  0.88, 0.092),
        row(5.00,  3.5, -1.46,  -0.725,  0.4,   -0.2,   0.0,    0.664,  0.04,  -0.215,   0.89, 0.087),
    ])
}
