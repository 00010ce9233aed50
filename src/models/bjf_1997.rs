//! Boore, Joyner & Fumal (1997) attenuation relationship. Joyner-Boore
//! distance, continuous vs30 site scaling.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{GfResult, GroundForgeError};
use crate::table::{CoefficientRecord, CoefficientTable};

use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "BJF-1997";

#[derive(Debug, Clone, Copy)]
pub struct Bjf1997Record {
    pub period: f64,
    pub b1ss: f64,
    pub b1rv: f64,
    pub b1all: f64,
    pub b2: f64,
    pub b3: f64,
    pub b5: f64,
    pub bv: f64,
    pub va: f64,
    pub h: f64,
    pub sigma1: f64,
    pub sigma_c: f64,
    pub sigma_r: f64,
    pub sigma_e: f64,
    pub sigma_ln_y: f64,
}

impl CoefficientRecord for Bjf1997Record {
    fn period(&self) -> f64 {
        self.period
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Bjf1997Fault {
    StrikeSlip,
    Reverse,
    /// Mechanism not classified; uses the all-mechanism b1. Normal-faulting
    /// events land here.
    Unknown,
}

impl Bjf1997Fault {
    /// Strike-slip within 30 degrees of horizontal slip, reverse for rakes
    /// in [30, 150], unknown otherwise.
    pub fn from_rake(rake: f64) -> Self {
        if rake.to_radians().sin().abs() <= 0.5 {
            Bjf1997Fault::StrikeSlip
        } else if (30.0..=150.0).contains(&rake) {
            Bjf1997Fault::Reverse
        } else {
            Bjf1997Fault::Unknown
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bjf1997Inputs {
    pub mag: f64,
    pub r_jb: f64,
    pub fault: Bjf1997Fault,
    pub vs30: f64,
}

pub struct Bjf1997 {
    table: CoefficientTable<Bjf1997Record>,
    component: Component,
    max_distance: f64,
}

impl Bjf1997 {
    pub fn new() -> Self {
        Bjf1997 {
            table: build_table(),
            component: Component::AverageHorizontal,
            max_distance: f64::MAX,
        }
    }

    /// The component selects the sigma derivation; means are identical.
    pub fn for_component(component: Component) -> GfResult<Self> {
        match component {
            Component::AverageHorizontal | Component::RandomHorizontal => Ok(Bjf1997 {
                component,
                ..Self::new()
            }),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines horizontal components only, got {other}"
            ))),
        }
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance = km;
        self
    }

    fn record_for(&self, imt: Imt) -> GfResult<&Bjf1997Record> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }
}

impl Default for Bjf1997 {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelEvaluator for Bjf1997 {
    type Inputs = Bjf1997Inputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &Bjf1997Inputs, imt: Imt) -> GfResult<f64> {
        if inputs.r_jb > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let rec = self.record_for(imt)?;
        let b1 = match inputs.fault {
            Bjf1997Fault::StrikeSlip => rec.b1ss,
            Bjf1997Fault::Reverse => rec.b1rv,
            Bjf1997Fault::Unknown => rec.b1all,
        };
        let m6 = inputs.mag - 6.0;
        let d = (inputs.r_jb * inputs.r_jb + rec.h * rec.h).sqrt();
        Ok(b1 + rec.b2 * m6 + rec.b3 * m6 * m6 + rec.b5 * d.ln() + rec.bv * (inputs.vs30 / rec.va).ln())
    }

    fn std_dev(&self, _inputs: &Bjf1997Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        if ty == StdDevType::None {
            return Ok(0.0);
        }
        let rec = self.record_for(imt)?;
        match self.component {
            Component::AverageHorizontal => match ty {
                StdDevType::Total => {
                    Ok((rec.sigma_e * rec.sigma_e + rec.sigma1 * rec.sigma1).sqrt())
                }
                StdDevType::Inter => Ok(rec.sigma_e),
                StdDevType::Intra => Ok(rec.sigma1),
                other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                    "{NAME} does not define {other} sigma"
                ))),
            },
            Component::RandomHorizontal => match ty {
                StdDevType::Total => Ok(rec.sigma_ln_y),
                StdDevType::Inter => Ok(rec.sigma_e),
                StdDevType::Intra => {
                    Ok((rec.sigma_ln_y * rec.sigma_ln_y - rec.sigma_e * rec.sigma_e).sqrt())
                }
                other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                    "{NAME} does not define {other} sigma"
                ))),
            },
            // unreachable by construction
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines horizontal components only, got {other}"
            ))),
        }
    }
}

#[rustfmt::skip]
fn build_table() -> CoefficientTable<Bjf1997Record> {
    fn row(period: f64, b1ss: f64, b1rv: f64, b1all: f64, b2: f64, b3: f64, b5: f64,
           bv: f64, va: f64, h: f64, sigma1: f64, sigma_c: f64, sigma_r: f64,
           sigma_e: f64, sigma_ln_y: f64) -> Bjf1997Record {
        Bjf1997Record { period, b1ss, b1rv, b1all, b2, b3, b5, bv, va, h,
                        sigma1, sigma_c, sigma_r, sigma_e, sigma_ln_y }
    }
    CoefficientTable::new(NAME, vec![
        row(0.00, -0.313, -0.117, -0.242, 0.527,  0.000, -0.778, -0.371, 1396.0, 5.57, 0.431, 0.226, 0.486, 0.184, 0.520),
        row(0.10,  1.006,  1.087,  1.059, 0.753, -0.226, -0.934, -0.212, 1112.0, 6.27, 0.440, 0.189, 0.479, 0.000, 0.479),
        row(0.11,  1.072,  1.164,  1.13,  0.732, -0.23,  -0.937, -0.211, 1291.0, 6.65, 0.437, 0.200, 0.481, 0.000, 0.481),
        row(0.12,  1.109,  1.215,  1.174, 0.721, -0.233, -0.939, -0.215, 1452.0, 6.91, 0.437, 0.210, 0.485, 0.000, 0.485),
        row(0.13,  1.128,  1.246,  1.2,   0.711, -0.233, -0.939, -0.221, 1596.0, 7.08, 0.435, 0.216, 0.486, 0.000, 0.486),
        row(0.14,  1.135,  1.261,  1.208, 0.707, -0.23,  -0.938, -0.228, 1718.0, 7.18, 0.435, 0.223, 0.489, 0.000, 0.489),
        row(0.15,  1.128,  1.264,  1.204, 0.702, -0.228, -0.937, -0.238, 1820.0, 7.23, 0.435, 0.230, 0.492, 0.000, 0.492),
        row(0.16,  1.112,  1.257,  1.192, 0.702, -0.226, -0.935, -0.248, 1910.0, 7.24, 0.435, 0.235, 0.495, 0.000, 0.495),
        row(0.17,  1.09,   1.242,  1.173, 0.702, -0.221, -0.933, -0.258, 1977.0, 7.21, 0.435, 0.293, 0.497, 0.000, 0.497),
        row(0.18,  1.063,  1.222,  1.151, 0.705, -0.216, -0.93,  -0.27,  2037.0, 7.16, 0.435, 0.244, 0.499, 0.002, 0.499),
        row(0.19,  1.032,  1.198,  1.122, 0.709, -0.212, -0.927, -0.281, 2080.0, 7.10, 0.435, 0.294, 0.501, 0.005, 0.501),
        row(0.20,  0.999,  1.17,   1.089, 0.711, -0.207, -0.924, -0.292, 2118.0, 7.02, 0.435, 0.251, 0.502, 0.009, 0.502),
        row(0.22,  0.925,  1.104,  1.019, 0.721, -0.198, -0.918, -0.315, 2158.0, 6.83, 0.437, 0.285, 0.508, 0.016, 0.508),
        row(0.24,  0.847,  1.033,  0.941, 0.732, -0.189, -0.912, -0.338, 2178.0, 6.62, 0.437, 0.262, 0.510, 0.025, 0.511),
        row(0.26,  0.764,  0.958,  0.861, 0.744, -0.18,  -0.906, -0.36,  2173.0, 6.39, 0.437, 0.267, 0.513, 0.032, 0.514),
        row(0.28,  0.681,  0.881,  0.78,  0.758, -0.168, -0.899, -0.381, 2158.0, 6.17, 0.440, 0.272, 0.517, 0.039, 0.518),
        row(0.30,  0.598,  0.803,  0.7,   0.769, -0.161, -0.893, -0.401, 2133.0, 5.94, 0.440, 0.276, 0.519, 0.048, 0.522),
        row(0.32,  0.518,  0.725,  0.619, 0.783, -0.152, -0.888, -0.42,  2104.0, 5.72, 0.442, 0.279, 0.523, 0.055, 0.525),
        row(0.34,  0.439,  0.648,  0.54,  0.794, -0.143, -0.882, -0.438, 2070.0, 5.50, 0.444, 0.281, 0.526, 0.064, 0.530),
        row(0.36,  0.361,  0.57,   0.462, 0.806, -0.136, -0.877, -0.456, 2032.0, 5.30, 0.444, 0.283, 0.527, 0.071, 0.532),
        row(0.38,  0.286,  0.495,  0.385, 0.82,  -0.127, -0.872, -0.472, 1995.0, 5.10, 0.447, 0.286, 0.530, 0.078, 0.536),
        row(0.40,  0.212,  0.423,  0.311, 0.831, -0.12,  -0.867, -0.487, 1954.0, 4.91, 0.447, 0.288, 0.531, 0.085, 0.538),
        row(0.42,  0.14,   0.352,  0.239, 0.84,  -0.113, -0.862, -0.502, 1919.0, 4.74, 0.449, 0.290, 0.535, 0.092, 0.542),
        row(0.44,  0.073,  0.282,  0.169, 0.852, -0.108, -0.858, -0.516, 1884.0, 4.57, 0.449, 0.292, 0.536, 0.099, 0.545),
        row(0.46,  0.005,  0.217,  0.102, 0.863, -0.101, -0.854, -0.529, 1849.0, 4.41, 0.451, 0.295, 0.539, 0.104, 0.549),
        row(0.48, -0.058,  0.151,  0.036, 0.873, -0.097, -0.85,  -0.541, 1816.0, 4.26, 0.451, 0.297, 0.540, 0.111, 0.551),
        row(0.50, -0.122,  0.087, -0.025, 0.884, -0.09,  -0.846, -0.553, 1782.0, 4.13, 0.454, 0.299, 0.543, 0.115, 0.556),
        row(0.55, -0.268, -0.063, -0.176, 0.907, -0.078, -0.837, -0.579, 1710.0, 3.82, 0.456, 0.302, 0.547, 0.129, 0.562),
        row(0.60, -0.401, -0.203, -0.314, 0.928, -0.069, -0.83,  -0.602, 1644.0, 3.57, 0.458, 0.306, 0.551, 0.143, 0.569),
        row(0.65, -0.523, -0.331, -0.44,  0.946, -0.06,  -0.823, -0.622, 1592.0, 3.36, 0.461, 0.309, 0.554, 0.154, 0.575),
        row(0.70, -0.634, -0.452, -0.555, 0.962, -0.053, -0.818, -0.639, 1545.0, 3.20, 0.463, 0.311, 0.558, 0.166, 0.582),
        row(0.75, -0.737, -0.562, -0.661, 0.979, -0.046, -0.813, -0.653, 1507.0, 3.07, 0.465, 0.313, 0.561, 0.175, 0.587),
        row(0.80, -0.829, -0.666, -0.76,  0.992, -0.041, -0.809, -0.666, 1476.0, 2.98, 0.467, 0.315, 0.564, 0.184, 0.593),
        row(0.85, -0.915, -0.761, -0.851, 1.006, -0.037, -0.805, -0.676, 1452.0, 2.92, 0.467, 0.320, 0.567, 0.191, 0.598),
        row(0.90, -0.993, -0.848, -0.933, 1.018, -0.035, -0.802, -0.685, 1432.0, 2.89, 0.470, 0.322, 0.570, 0.200, 0.604),
        row(0.95, -1.066, -0.932, -1.01,  1.027, -0.032, -0.8,   -0.692, 1416.0, 2.88, 0.472, 0.325, 0.573, 0.207, 0.609),
        row(1.00, -1.133, -1.009, -1.08,  1.036, -0.032, -0.798, -0.698, 1406.0, 2.90, 0.474, 0.325, 0.575, 0.214, 0.613),
        row(1.10, -1.249, -1.145, -1.208, 1.052, -0.03,  -0.795, -0.706, 1396.0, 2.99, 0.477, 0.329, 0.579, 0.226, 0.622),
        row(1.20, -1.345, -1.265, -1.315, 1.064, -0.032, -0.794, -0.71,  1400.0, 3.14, 0.479, 0.334, 0.584, 0.235, 0.629),
        row(1.30, -1.428, -1.37,  -1.407, 1.073, -0.035, -0.793, -0.711, 1416.0, 3.36, 0.481, 0.338, 0.588, 0.244, 0.637),
        row(1.40, -1.495, -1.46,  -1.483, 1.08,  -0.039, -0.794, -0.709, 1442.0, 3.62, 0.484, 0.341, 0.592, 0.251, 0.643),
        row(1.50, -1.552, -1.538, -1.55,  1.085, -0.044, -0.796, -0.704, 1479.0, 3.92, 0.486, 0.345, 0.596, 0.256, 0.649),
        row(1.60, -1.598, -1.608, -1.605, 1.087, -0.051, -0.798, -0.697, 1524.0, 4.26, 0.488, 0.348, 0.599, 0.262, 0.654),
        row(1.70, -1.634, -1.668, -1.652, 1.089, -0.058, -0.801, -0.689, 1581.0, 4.62, 0.490, 0.352, 0.604, 0.267, 0.660),
        row(1.80, -1.663, -1.718, -1.689, 1.087, -0.067, -0.804, -0.679, 1644.0, 5.01, 0.493, 0.355, 0.607, 0.269, 0.664),
        row(1.90, -1.685, -1.763, -1.72,  1.087, -0.074, -0.808, -0.667, 1714.0, 5.42, 0.493, 0.359, 0.610, 0.274, 0.669),
        row(2.00, -1.699, -1.801, -1.743, 1.085, -0.085, -0.812, -0.655, 1795.0, 5.85, 0.495, 0.362, 0.613, 0.276, 0.672),
    ])
}
