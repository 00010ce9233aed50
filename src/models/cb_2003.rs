//! Campbell & Bozorgnia (2003). Seismogenic distance, five site categories
//! plus two rock mixes, fractional fault-type weights, horizontal and
//! vertical component tables.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{GfResult, GroundForgeError};
use crate::table::{CoefficientRecord, CoefficientTable};

use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "CB-2003";

#[derive(Debug, Clone, Copy)]
pub struct Cb2003Record {
    pub period: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
    pub c5: f64,
    pub c6: f64,
    pub c7: f64,
    pub c8: f64,
    pub c9: f64,
    pub c10: f64,
    pub c11: f64,
    pub c12: f64,
    pub c13: f64,
    pub c14: f64,
    pub c15: f64,
    pub c16: f64,
    pub c17: f64,
    pub bv: f64,
}

impl CoefficientRecord for Cb2003Record {
    fn period(&self) -> f64 {
        self.period
    }
}

/// Fault category with fractional (F_rv, F_th) weights. ReverseThrust and
/// Unknown are explicit inputs, never produced by the rake mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Cb2003Fault {
    Reverse,
    Thrust,
    ReverseThrust,
    Other,
    Unknown,
}

impl Cb2003Fault {
    /// Rakes in [22.5, 157.5] split on dip at 45 degrees; everything else
    /// (strike-slip and normal) is Other.
    pub fn from_rake_dip(rake: f64, dip: f64) -> Self {
        if (22.5..=157.5).contains(&rake) {
            if dip >= 45.0 {
                Cb2003Fault::Reverse
            } else {
                Cb2003Fault::Thrust
            }
        } else {
            Cb2003Fault::Other
        }
    }

    fn weights(self) -> (f64, f64) {
        match self {
            Cb2003Fault::Reverse => (1.0, 0.0),
            Cb2003Fault::Thrust => (0.0, 1.0),
            Cb2003Fault::ReverseThrust => (0.5, 0.5),
            Cb2003Fault::Other => (0.0, 0.0),
            Cb2003Fault::Unknown => (0.25, 0.25),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Cb2003Site {
    FirmSoil,
    VeryFirmSoil,
    SoftRock,
    FirmRock,
    GenericSoil,
    /// Half soft rock, half firm rock; unlike NehrpBc it takes no velocity
    /// correction and is legal with the vertical component.
    GenericRock,
    NehrpBc,
}

impl Cb2003Site {
    /// (S_vfs, S_sr, S_fr) dummy weights.
    fn dummies(self) -> (f64, f64, f64) {
        match self {
            Cb2003Site::FirmSoil => (0.0, 0.0, 0.0),
            Cb2003Site::VeryFirmSoil => (1.0, 0.0, 0.0),
            Cb2003Site::SoftRock => (0.0, 1.0, 0.0),
            Cb2003Site::FirmRock => (0.0, 0.0, 1.0),
            Cb2003Site::GenericSoil => (0.25, 0.0, 0.0),
            Cb2003Site::GenericRock => (0.0, 0.5, 0.5),
            Cb2003Site::NehrpBc => (0.0, 0.5, 0.5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cb2003Inputs {
    pub mag: f64,
    pub r_seis: f64,
    /// Geometric hanging-wall taper; zeroed internally for category Other.
    pub hanging_wall_taper: f64,
    pub fault: Cb2003Fault,
    pub site: Cb2003Site,
}

pub struct Cb2003 {
    table: CoefficientTable<Cb2003Record>,
    component: Component,
    max_distance: f64,
}

impl Cb2003 {
    pub fn new() -> Self {
        Cb2003 {
            table: build_horizontal_table(),
            component: Component::AverageHorizontal,
            max_distance: f64::MAX,
        }
    }

    /// Horizontal and vertical carry separate coefficient tables.
    pub fn for_component(component: Component) -> GfResult<Self> {
        let table = match component {
            Component::AverageHorizontal => build_horizontal_table(),
            Component::Vertical => build_vertical_table(),
            other => {
                return Err(GroundForgeError::UnsupportedConfiguration(format!(
                    "{NAME} defines average_horizontal and vertical components only, got {other}"
                )))
            }
        };
        Ok(Cb2003 {
            table,
            component,
            max_distance: f64::MAX,
        })
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance = km;
        self
    }

    fn check_site(&self, site: Cb2003Site) -> GfResult<()> {
        if self.component == Component::Vertical && site == Cb2003Site::NehrpBc {
            return Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define the nehrp_bc site type for the vertical component"
            )));
        }
        Ok(())
    }

    fn record_for(&self, imt: Imt) -> GfResult<&Cb2003Record> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }

    fn mean_with(&self, rec: &Cb2003Record, inputs: &Cb2003Inputs) -> f64 {
        let mag = inputs.mag;
        let dist = inputs.r_seis;
        let (f_rv, f_th) = inputs.fault.weights();
        let (s_vfs, s_sr, s_fr) = inputs.site.dummies();
        let taper = if inputs.fault == Cb2003Fault::Other {
            0.0
        } else {
            inputs.hanging_wall_taper
        };

        let sat = (8.5 - mag) * (8.5 - mag);
        let mut f1 = rec.c2 * mag + rec.c3 * sat;
        let g = rec.c5 + rec.c6 * (s_vfs + s_sr) + rec.c7 * s_fr;
        let near = (rec.c8 * mag + rec.c9 * sat).exp();
        let f2 = dist * dist + g * g * near * near;
        let f3 = rec.c10 * f_rv + rec.c11 * f_th;
        let f4 = rec.c12 * s_vfs + rec.c13 * s_sr + rec.c14 * s_fr;

        let f_hw_m = if mag < 5.5 {
            0.0
        } else if mag < 6.5 {
            mag - 5.5
        } else {
            1.0
        };
        let f_hw_r = if dist < 8.0 {
            rec.c15 * (dist / 8.0)
        } else {
            rec.c15
        };
        let f5 = taper * (s_vfs + s_sr + s_fr) * f_hw_m * f_hw_r;

        if inputs.site == Cb2003Site::NehrpBc {
            f1 += rec.bv * (760.0 / 620.0_f64).ln();
        }

        rec.c1 + f1 + rec.c4 * 0.5 * f2.ln() + f3 + f4 + f5
    }
}

impl Default for Cb2003 {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelEvaluator for Cb2003 {
    type Inputs = Cb2003Inputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &Cb2003Inputs, imt: Imt) -> GfResult<f64> {
        self.check_site(inputs.site)?;
        if inputs.r_seis > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let rec = self.record_for(imt)?;
        Ok(self.mean_with(rec, inputs))
    }

    fn std_dev(&self, inputs: &Cb2003Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        self.check_site(inputs.site)?;
        match ty {
            StdDevType::None => Ok(0.0),
            StdDevType::TotalMagDep => {
                let rec = self.record_for(imt)?;
                if inputs.mag < 7.4 {
                    Ok(rec.c16 - 0.07 * inputs.mag)
                } else {
                    Ok(rec.c16 - 0.518)
                }
            }
            StdDevType::TotalPgaDep => {
                // peak acceleration from this model's own PGA row, then the
                // requested measure's c17
                let pga_rec = self.table.find_pga()?;
                let pga = self.mean_with(pga_rec, inputs).exp();
                let rec = self.record_for(imt)?;
                if pga <= 0.07 {
                    Ok(rec.c17 + 0.351)
                } else if pga < 0.25 {
                    Ok(rec.c17 - 0.132 * pga.ln())
                } else {
                    Ok(rec.c17 + 0.183)
                }
            }
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines magnitude- or pga-dependent total sigma only, got {other}"
            ))),
        }
    }
}

#[rustfmt::skip]
fn build_horizontal_table() -> CoefficientTable<Cb2003Record> {
    CoefficientTable::new(NAME, vec![
        row(0.000, -4.033, 0.812,  0.036, -1.061, 0.041, -0.005, -0.018, 0.766,  0.034,  0.343, 0.351, -0.123, -0.138, -0.289, 0.370, 0.920, 0.219, -0.371),
        row(0.050, -3.740, 0.812,  0.036, -1.121, 0.058, -0.004, -0.028, 0.724,  0.032,  0.302, 0.362, -0.140, -0.158, -0.205, 0.370, 0.940, 0.239, -0.304),
        row(0.075, -3.076, 0.812,  0.050, -1.252, 0.121, -0.005, -0.051, 0.648,  0.040,  0.243, 0.333, -0.150, -0.196, -0.208, 0.370, 0.952, 0.251, -0.250),
        row(0.100, -2.661, 0.812,  0.060, -1.308, 0.166, -0.009, -0.068, 0.621,  0.046,  0.224, 0.313, -0.146, -0.253, -0.258, 0.370, 0.958, 0.257, -0.212),
        row(0.150, -2.270, 0.812,  0.041, -1.324, 0.212, -0.033, -0.081, 0.613,  0.031,  0.318, 0.344, -0.176, -0.267, -0.284, 0.370, 0.974, 0.273, -0.238),
        row(0.200, -2.771, 0.812,  0.030, -1.153, 0.098, -0.014, -0.038, 0.704,  0.026,  0.296, 0.342, -0.148, -0.183, -0.359, 0.370, 0.981, 0.280, -0.292),
        row(0.300, -2.999, 0.812,  0.007, -1.080, 0.059, -0.007, -0.022, 0.752,  0.007,  0.359, 0.385, -0.162, -0.157, -0.585, 0.370, 0.984, 0.283, -0.401),
        row(0.400, -3.511, 0.812, -0.015, -0.964, 0.024, -0.002, -0.005, 0.842, -0.016,  0.379, 0.438, -0.078, -0.129, -0.557, 0.370, 0.987, 0.286, -0.487),
        row(0.500, -3.556, 0.812, -0.035, -0.964, 0.023, -0.002, -0.004, 0.842, -0.036,  0.406, 0.479, -0.122, -0.130, -0.701, 0.370, 0.990, 0.289, -0.553),
        row(0.750, -3.709, 0.812, -0.071, -0.964, 0.021, -0.002, -0.002, 0.842, -0.074,  0.347, 0.419, -0.108, -0.124, -0.796, 0.331, 1.021, 0.320, -0.653),
        row(1.000, -3.867, 0.812, -0.101, -0.964, 0.019,  0.000,  0.000, 0.842, -0.105,  0.329, 0.338, -0.073, -0.072, -0.858, 0.281, 1.021, 0.320, -0.698),
        row(1.500, -4.093, 0.812, -0.150, -0.964, 0.019,  0.000,  0.000, 0.842, -0.155,  0.217, 0.188, -0.079, -0.056, -0.954, 0.210, 1.021, 0.320, -0.704),
        row(2.000, -4.311, 0.812, -0.180, -0.964, 0.019,  0.000,  0.000, 0.842, -0.187,  0.060, 0.064, -0.124, -0.116, -0.916, 0.160, 1.021, 0.320, -0.655),
        row(3.000, -4.817, 0.812, -0.193, -0.964, 0.019,  0.000,  0.000, 0.842, -0.200, -0.079, 0.021, -0.154, -0.117, -0.873, 0.089, 1.021, 0.320, -0.655),
        row(4.000, -5.211, 0.812, -0.202, -0.964, 0.019,  0.000,  0.000, 0.842, -0.209, -0.061, 0.057, -0.054, -0.261, -0.889, 0.039, 1.021, 0.320, -0.655),
    ])
}

#[rustfmt::skip]
fn build_vertical_table() -> CoefficientTable<Cb2003Record> {
    CoefficientTable::new(NAME, vec![
        row(0.000, -3.108, 0.756,  0.000, -1.287, 0.142, 0.046, -0.040, 0.587,  0.000, 0.253, 0.173, -0.135, -0.138, -0.256, 0.630, 0.975, 0.274, -0.371),
        row(0.050, -1.918, 0.756,  0.000, -1.517, 0.309, 0.069, -0.023, 0.498,  0.000, 0.058, 0.100, -0.195, -0.274, -0.219, 0.630, 1.031, 0.330, -0.304),
        row(0.075, -1.504, 0.756,  0.000, -1.551, 0.343, 0.083,  0.000, 0.487,  0.000, 0.135, 0.182, -0.224, -0.303, -0.263, 0.630, 1.031, 0.330, -0.250),
        row(0.100, -1.672, 0.756,  0.000, -1.473, 0.282, 0.062,  0.001, 0.513,  0.000, 0.168, 0.210, -0.198, -0.275, -0.252, 0.630, 1.031, 0.330, -0.212),
        row(0.150, -2.323, 0.756,  0.000, -1.280, 0.171, 0.045,  0.008, 0.591,  0.000, 0.223, 0.238, -0.170, -0.175, -0.270, 0.630, 1.031, 0.330, -0.238),
        row(0.200, -2.998, 0.756,  0.000, -1.131, 0.089, 0.028,  0.004, 0.668,  0.000, 0.234, 0.256, -0.098, -0.041, -0.311, 0.571, 1.031, 0.330, -0.292),
        row(0.300, -3.721, 0.756,  0.007, -1.028, 0.050, 0.010,  0.004, 0.736,  0.007, 0.249, 0.328, -0.026,  0.082, -0.265, 0.488, 1.031, 0.330, -0.401),
        row(0.400, -4.536, 0.756, -0.015, -0.812, 0.012, 0.000,  0.000, 0.931, -0.018, 0.299, 0.317, -0.017,  0.022, -0.257, 0.428, 1.031, 0.330, -0.487),
        row(0.500, -4.651, 0.756, -0.035, -0.812, 0.012, 0.000,  0.000, 0.931, -0.043, 0.243, 0.354, -0.020,  0.092, -0.293, 0.383, 1.031, 0.330, -0.553),
        row(0.750, -4.903, 0.756, -0.071, -0.812, 0.012, 0.000,  0.000, 0.931, -0.087, 0.295, 0.418,  0.078,  0.091, -0.349, 0.299, 1.031, 0.330, -0.653),
        row(1.000, -4.950, 0.756, -0.101, -0.812, 0.012, 0.000,  0.000, 0.931, -0.124, 0.266, 0.315,  0.043,  0.101, -0.481, 0.240, 1.031, 0.330, -0.698),
        row(1.500, -5.073, 0.756, -0.150, -0.812, 0.012, 0.000,  0.000, 0.931, -0.184, 0.171, 0.211, -0.038, -0.018, -0.518, 0.240, 1.031, 0.330, -0.704),
        row(2.000, -5.292, 0.756, -0.180, -0.812, 0.012, 0.000,  0.000, 0.931, -0.222, 0.114, 0.115,  0.033, -0.022, -0.503, 0.240, 1.031, 0.330, -0.655),
        row(3.000, -5.748, 0.756, -0.193, -0.812, 0.012, 0.000,  0.000, 0.931, -0.238, 0.179, 0.159, -0.010, -0.047, -0.539, 0.240, 1.031, 0.330, -0.655),
        row(4.000, -6.042, 0.756, -0.202, -0.812, 0.012, 0.000,  0.000, 0.931, -0.248, 0.237, 0.134, -0.059, -0.267, -0.606, 0.240, 1.031, 0.330, -0.655),
    ])
}

#[rustfmt::skip]
#[allow(clippy::too_many_arguments)]
fn row(period: f64, c1: f64, c2: f64, c3: f64, c4: f64, c5: f64, c6: f64, c7: f64,
       c8: f64, c9: f64, c10: f64, c11: f64, c12: f64, c13: f64, c14: f64, c15: f64,
       c16: f64, c17: f64, bv: f64) -> Cb2003Record {
    Cb2003Record { period, c1, c2, c3, c4, c5, c6, c7, c8, c9,
                   c10, c11, c12, c13, c14, c15, c16, c17, bv }
}
