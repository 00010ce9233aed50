//! Abrahamson & Silva (2008) NGA ground-motion relation for shallow
//! crustal earthquakes, GMRotI50 component. Nonlinear site response is
//! keyed to the 1100 m/s rock PGA, so every mean is a two-phase
//! evaluation: rock PGA first, then the requested measure conditioned on
//! it. Long-period means follow the constant-displacement model, which
//! interpolates the rock spectrum at the corner period Td.

use crate::error::{GfResult, GroundForgeError};
use crate::table::{self, CoefficientRecord, CoefficientTable};

use super::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

pub const NAME: &str = "AS-2008";

const COEFF_RESOURCE: &str = include_str!("../../data/as_2008_coeff.txt");

// Period-independent coefficients of the base and site models.
const C1: f64 = 6.75;
const C4: f64 = 4.5;
const A3: f64 = 0.265;
const A4: f64 = -0.231;
const A5: f64 = -0.398;
const N: f64 = 1.18;
const C: f64 = 1.88;
const C2: f64 = 50.0;
/// Site-amplification scatter, constant across periods.
const SIGMA_AMP: f64 = 0.3;
/// Reference rock velocity the nonlinear site term is anchored to.
const VS30_ROCK: f64 = 1100.0;

/// One period column of the coefficient resource.
#[derive(Debug, Clone, Copy)]
pub struct As2008Record {
    pub period: f64,
    pub vlin: f64,
    pub b: f64,
    pub a1: f64,
    pub a2: f64,
    pub a8: f64,
    pub a10: f64,
    pub a12: f64,
    pub a13: f64,
    pub a14: f64,
    pub a15: f64,
    pub a16: f64,
    pub a18: f64,
    pub s1e: f64,
    pub s2e: f64,
    pub s1m: f64,
    pub s2m: f64,
    pub s3: f64,
    pub s4: f64,
    pub rho: f64,
}

impl CoefficientRecord for As2008Record {
    fn period(&self) -> f64 {
        self.period
    }
}

/// Style of faulting, from rake: (30, 150) reverse, (-150, -30) normal,
/// everything else strike-slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum As2008Fault {
    StrikeSlip,
    Reverse,
    Normal,
}

impl As2008Fault {
    pub fn from_rake(rake: f64) -> Self {
        if rake > 30.0 && rake < 150.0 {
            As2008Fault::Reverse
        } else if rake > -150.0 && rake < -30.0 {
            As2008Fault::Normal
        } else {
            As2008Fault::StrikeSlip
        }
    }

    /// (f_rv, f_nm) indicator pair.
    fn weights(self) -> (f64, f64) {
        match self {
            As2008Fault::StrikeSlip => (0.0, 0.0),
            As2008Fault::Reverse => (1.0, 0.0),
            As2008Fault::Normal => (0.0, 1.0),
        }
    }
}

/// Rupture, path, and site description. Path geometry arrives as rRup plus
/// the two ratio parameters, so a hazard loop can scale all three distances
/// off one rupture distance. rJB and rX are reconstructed internally.
#[derive(Debug, Clone)]
pub struct As2008Inputs {
    pub mag: f64,
    pub r_rup: f64,
    /// (rRup - rJB) / rRup.
    pub rup_minus_jb_over_rup: f64,
    /// (rRup - |rX|) / rRup.
    pub rup_minus_x_over_rup: f64,
    pub on_hanging_wall_side: bool,
    pub fault: As2008Fault,
    pub is_aftershock: bool,
    pub dip_deg: f64,
    pub rup_width_km: f64,
    pub depth_top_km: f64,
    pub vs30: f64,
    /// Measured vs30 selects the measured sigma coefficients; an estimate
    /// selects the wider estimated set.
    pub vs30_measured: bool,
    /// Depth to the 1.0 km/s horizon in meters; None infers it from vs30.
    pub depth_1p0_m: Option<f64>,
}

pub struct As2008 {
    table: CoefficientTable<As2008Record>,
    max_distance: f64,
}

impl As2008 {
    pub fn new() -> GfResult<Self> {
        Ok(As2008 {
            table: parse_table(COEFF_RESOURCE)?,
            max_distance: f64::MAX,
        })
    }

    pub fn for_component(component: Component) -> GfResult<Self> {
        if component != Component::GmRotI50 {
            return Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} supports the gm_rot_i50 component only, got {component}"
            )));
        }
        Self::new()
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance = km;
        self
    }

    fn record_for(&self, imt: Imt) -> GfResult<&As2008Record> {
        match imt {
            Imt::Pga => self.table.find_pga(),
            Imt::Pgv => self.table.find_pgv(),
            Imt::Sa(period) => self.table.find_sa(period),
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} does not define {other}"
            ))),
        }
    }

    /// Rock PGA in g at 1100 m/s, the anchor of the nonlinear site and
    /// sigma models.
    fn rock_pga(&self, inputs: &As2008Inputs, r_jb: f64, r_x: f64) -> GfResult<f64> {
        let pga_rec = self.table.find_pga()?;
        Ok(base_mean(pga_rec, inputs, r_jb, r_x, VS30_ROCK, 0.0).exp())
    }
}

/// Period-dependent velocity cap v1 on the site term.
fn v1_for(period: f64) -> f64 {
    if period == table::PGV_SENTINEL {
        862.0
    } else if period <= 0.5 {
        1500.0
    } else if period <= 1.0 {
        (8.0 - 0.795 * (period / 0.21).ln()).exp()
    } else if period < 2.0 {
        (6.76 - 0.297 * period.ln()).exp()
    } else {
        700.0
    }
}

/// Site response f5: nonlinear in rock PGA below vlin, logarithmic-linear
/// above it. `pga_rock` is in g.
fn site_amp(rec: &As2008Record, vs30: f64, pga_rock: f64) -> f64 {
    let v1 = v1_for(rec.period);
    let vs30_star = vs30.min(v1);
    if vs30 < rec.vlin {
        rec.a10 * (vs30_star / rec.vlin).ln() - rec.b * (pga_rock + C).ln()
            + rec.b * (pga_rock + C * (vs30_star / rec.vlin).powf(N)).ln()
    } else {
        (rec.a10 + rec.b * N) * (vs30_star / rec.vlin).ln()
    }
}

/// Median depth to the 1.0 km/s horizon implied by vs30, in meters.
fn default_basin_depth(vs30: f64) -> f64 {
    if vs30 < 180.0 {
        6.745_f64.exp()
    } else if vs30 > 500.0 {
        (5.394 - 4.48 * (vs30 / 500.0).ln()).exp()
    } else {
        (6.745 - 1.35 * (vs30 / 180.0).ln()).exp()
    }
}

/// Soil depth model f10, relative to the median depth for the site vs30.
fn basin_response(rec: &As2008Record, vs30: f64, z1: f64) -> f64 {
    let per = rec.period;
    let v1 = v1_for(per);
    let vs30_star = vs30.min(v1);

    let z1_hat = if vs30 < 180.0 {
        6.745_f64.exp()
    } else if vs30 <= 500.0 {
        (6.745 - 1.35 * (vs30 / 180.0).ln()).exp()
    } else {
        (5.394 - 4.48 * (vs30 / 500.0).ln()).exp()
    };

    let e2 = if (per < 0.35 && per > table::PGV_SENTINEL) || vs30 > 1000.0 {
        0.0
    } else if (0.35..2.0).contains(&per) {
        -0.25 * (vs30 / 1000.0).ln() * (per / 0.35).ln()
    } else if per == table::PGV_SENTINEL {
        -0.25 * (vs30 / 1000.0).ln() * (1.0 / 0.35_f64).ln()
    } else {
        -0.25 * (vs30 / 1000.0).ln() * (2.0 / 0.35_f64).ln()
    };

    let depth_ratio = ((z1 + C2) / (z1_hat + C2)).ln();
    let linear = (rec.a10 + rec.b * N) * (vs30_star / v1.min(1000.0)).ln();
    let a21 = if vs30 >= 1000.0 {
        0.0
    } else if linear + e2 * depth_ratio < 0.0 {
        -linear / depth_ratio
    } else {
        e2
    };
    let a22 = if per < 2.0 { 0.0 } else { 0.0625 * (per - 2.0) };

    if z1 >= 200.0 {
        a21 * depth_ratio + a22 * (z1 / 200.0).ln()
    } else {
        a21 * depth_ratio
    }
}

/// Median ln motion for one coefficient record at the given vs30,
/// excluding the soil depth term f10. Covers the base model f1, style of
/// faulting, hanging wall f4, site response f5, rupture depth f6, and
/// large-distance f8 terms.
fn base_mean(
    rec: &As2008Record,
    inputs: &As2008Inputs,
    r_jb: f64,
    r_x: f64,
    vs30: f64,
    pga_rock: f64,
) -> f64 {
    let mag = inputs.mag;

    let r = (inputs.r_rup * inputs.r_rup + C4 * C4).sqrt();
    let slope = if mag <= C1 { A4 } else { A5 };
    let f1 = rec.a1
        + slope * (mag - C1)
        + rec.a8 * (8.5 - mag).powi(2)
        + (rec.a2 + A3 * (mag - C1)) * r.ln();

    let f5 = site_amp(rec, vs30, pga_rock);

    let mut f4 = 0.0;
    if inputs.on_hanging_wall_side {
        let t1 = if r_jb < 30.0 { 1.0 - r_jb / 30.0 } else { 0.0 };
        // taper across the surface projection of the rupture width
        let r_x_edge = inputs.rup_width_km * inputs.dip_deg.to_radians().cos();
        let t2 = if r_x > r_x_edge || inputs.dip_deg == 90.0 {
            1.0
        } else {
            0.5 + r_x / (2.0 * r_x_edge)
        };
        let t3 = if r_x >= inputs.depth_top_km {
            1.0
        } else {
            r_x / inputs.depth_top_km
        };
        let t4 = if mag <= 6.0 {
            0.0
        } else if mag >= 7.0 {
            1.0
        } else {
            mag - 6.0
        };
        let t5 = if inputs.dip_deg >= 70.0 {
            1.0 - (inputs.dip_deg - 70.0) / 20.0
        } else {
            1.0
        };
        f4 = rec.a14 * t1 * t2 * t3 * t4 * t5;
    }

    let f6 = if inputs.depth_top_km < 10.0 {
        rec.a16 * inputs.depth_top_km / 10.0
    } else {
        rec.a16
    };

    let t6 = if mag < 5.5 {
        1.0
    } else if mag > 6.5 {
        0.5
    } else {
        0.5 * (6.5 - mag) + 0.5
    };
    let f8 = if inputs.r_rup < 100.0 {
        0.0
    } else {
        rec.a18 * (inputs.r_rup - 100.0) * t6
    };

    let (f_rv, f_nm) = inputs.fault.weights();
    let f_as = if inputs.is_aftershock { 1.0 } else { 0.0 };

    f1 + rec.a12 * f_rv + rec.a13 * f_nm + rec.a15 * f_as + f4 + f5 + f6 + f8
}

impl ModelEvaluator for As2008 {
    type Inputs = As2008Inputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        self.table.supported_periods()
    }

    fn mean(&self, inputs: &As2008Inputs, imt: Imt) -> GfResult<f64> {
        if inputs.r_rup > self.max_distance {
            return Ok(VERY_SMALL_MEAN);
        }
        let rec = self.record_for(imt)?;

        let r_jb = inputs.r_rup - inputs.rup_minus_jb_over_rup * inputs.r_rup;
        let r_x = inputs.r_rup - inputs.rup_minus_x_over_rup * inputs.r_rup;

        let pga_rock = self.rock_pga(inputs, r_jb, r_x)?;

        let basin_depth = inputs
            .depth_1p0_m
            .unwrap_or_else(|| default_basin_depth(inputs.vs30));
        let f10 = basin_response(rec, inputs.vs30, basin_depth);

        // corner period of the constant-displacement model
        let td = 10.0_f64.powf(-1.25 + 0.3 * inputs.mag);
        let max_period = self.table.row(self.table.len() - 1).period;
        if rec.period < td || td >= max_period {
            return Ok(base_mean(rec, inputs, r_jb, r_x, inputs.vs30, pga_rock) + f10);
        }

        // Beyond Td the rock spectrum decays as 1/T^2 off the median at Td,
        // interpolated between the bracketing table periods; the site terms
        // are then swapped from rock to the site vs30.
        let i_td = self.table.bracketing_index(td);
        let lo = self.table.row(i_td);
        let hi = self.table.row(i_td + 1);
        let med_lo = base_mean(lo, inputs, r_jb, r_x, VS30_ROCK, pga_rock).exp();
        let med_hi = base_mean(hi, inputs, r_jb, r_x, VS30_ROCK, pga_rock).exp();
        let med_at_td = ((med_hi / med_lo).ln() / (hi.period / lo.period).ln()
            * (td / lo.period).ln()
            + med_lo.ln())
        .exp();
        let mean_1100 = med_at_td * (td / rec.period).powi(2);

        let f5_rock = site_amp(rec, VS30_ROCK, pga_rock);
        let f5_site = site_amp(rec, inputs.vs30, pga_rock);
        Ok(mean_1100.ln() - f5_rock + f5_site + f10)
    }

    fn std_dev(&self, inputs: &As2008Inputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        match ty {
            StdDevType::None => return Ok(0.0),
            StdDevType::Total | StdDevType::Inter | StdDevType::Intra => {}
            other => {
                return Err(GroundForgeError::UnsupportedConfiguration(format!(
                    "{NAME} defines total, inter, and intra sigma, not {other}"
                )))
            }
        }
        let rec = self.record_for(imt)?;
        let pga_rec = self.table.find_pga()?;

        let r_jb = inputs.r_rup - inputs.rup_minus_jb_over_rup * inputs.r_rup;
        let r_x = inputs.r_rup - inputs.rup_minus_x_over_rup * inputs.r_rup;
        let pga_rock = self.rock_pga(inputs, r_jb, r_x)?;

        // Slope of the site term in rock PGA; couples the PGA scatter into
        // the requested measure. Tested against vs30, evaluated at vs30Star.
        let vs30_star = inputs.vs30.min(v1_for(rec.period));
        let dterm = if inputs.vs30 < rec.vlin {
            rec.b
                * pga_rock
                * (-1.0 / (pga_rock + C)
                    + 1.0 / (pga_rock + C * (vs30_star / rec.vlin).powf(N)))
        } else {
            0.0
        };

        let (s1, s2, s1_pga, s2_pga) = if inputs.vs30_measured {
            (rec.s1m, rec.s2m, pga_rec.s1m, pga_rec.s2m)
        } else {
            (rec.s1e, rec.s2e, pga_rec.s1e, pga_rec.s2e)
        };

        let mag_interp = |lo: f64, hi: f64| {
            if inputs.mag < 5.0 {
                lo
            } else if inputs.mag > 7.0 {
                hi
            } else {
                lo + 0.5 * (hi - lo) * (inputs.mag - 5.0)
            }
        };

        let sigma0 = mag_interp(s1, s2);
        let sigma0_pga = mag_interp(s1_pga, s2_pga);
        let sigma_b = (sigma0 * sigma0 - SIGMA_AMP * SIGMA_AMP).sqrt();
        let sigma_b_pga = (sigma0_pga * sigma0_pga - SIGMA_AMP * SIGMA_AMP).sqrt();

        let tau0 = mag_interp(rec.s3, rec.s4);
        let tau0_pga = mag_interp(pga_rec.s3, pga_rec.s4);

        let intra = (sigma_b * sigma_b
            + SIGMA_AMP * SIGMA_AMP
            + dterm * dterm * sigma_b_pga * sigma_b_pga
            + 2.0 * dterm * sigma_b * sigma_b_pga * rec.rho)
            .sqrt();
        let inter = (tau0 * tau0
            + dterm * dterm * tau0_pga * tau0_pga
            + 2.0 * dterm * tau0 * tau0_pga * rec.rho)
            .sqrt();

        Ok(match ty {
            StdDevType::Total => (intra * intra + inter * inter).sqrt(),
            StdDevType::Inter => inter,
            _ => intra,
        })
    }
}

fn parse_table(text: &str) -> GfResult<CoefficientTable<As2008Record>> {
    let map = table::parse_labeled_resource(text)?;
    let periods = map
        .get("per")
        .ok_or_else(|| GroundForgeError::Config("coefficient line per is missing".into()))?;
    let n = periods.len();

    let vlin = table::labeled_line(&map, "VLIN", n)?;
    let b = table::labeled_line(&map, "b", n)?;
    let a1 = table::labeled_line(&map, "a1", n)?;
    let a2 = table::labeled_line(&map, "a2", n)?;
    let a8 = table::labeled_line(&map, "a8", n)?;
    let a10 = table::labeled_line(&map, "a10", n)?;
    let a12 = table::labeled_line(&map, "a12", n)?;
    let a13 = table::labeled_line(&map, "a13", n)?;
    let a14 = table::labeled_line(&map, "a14", n)?;
    let a15 = table::labeled_line(&map, "a15", n)?;
    let a16 = table::labeled_line(&map, "a16", n)?;
    let a18 = table::labeled_line(&map, "a18", n)?;
    let s1e = table::labeled_line(&map, "s1e", n)?;
    let s2e = table::labeled_line(&map, "s2e", n)?;
    let s1m = table::labeled_line(&map, "s1m", n)?;
    let s2m = table::labeled_line(&map, "s2m", n)?;
    let s3 = table::labeled_line(&map, "s3", n)?;
    let s4 = table::labeled_line(&map, "s4", n)?;
    let rho = table::labeled_line(&map, "rho", n)?;

    let rows = (0..n)
        .map(|i| As2008Record {
            period: periods[i],
            vlin: vlin[i],
            b: b[i],
            a1: a1[i],
            a2: a2[i],
            a8: a8[i],
            a10: a10[i],
            a12: a12[i],
            a13: a13[i],
            a14: a14[i],
            a15: a15[i],
            a16: a16[i],
            a18: a18[i],
            s1e: s1e[i],
            s2e: s2e[i],
            s1m: s1m[i],
            s2m: s2m[i],
            s3: s3[i],
            s4: s4[i],
            rho: rho[i],
        })
        .collect();
    Ok(CoefficientTable::new(NAME, rows))
}
