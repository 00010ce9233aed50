//! Four-relation average used for California ShakeMap-style products. The
//! Abrahamson & Silva, Campbell & Bozorgnia, Sadigh, and Boore-Joyner-Fumal
//! rock/BC medians are each amplified to the site vs30 with the Borcherdt
//! factors and then averaged in ln space. PGV comes from 1 s SA via the
//! Newmark-Hall scalar; MMI from the amplified PGA and PGV via Wald.
//! Exceedance works per constituent: each relation keeps its own sigma and
//! the resulting probabilities are averaged, never the sigmas themselves.

use crate::error::{GfResult, GroundForgeError};
use crate::prob::{self, SigmaTruncation};
use crate::siteamp;

use crate::models::as_1997::{As1997, As1997Fault, As1997Inputs, As1997Site};
use crate::models::bjf_1997::{Bjf1997, Bjf1997Fault, Bjf1997Inputs};
use crate::models::cb_2003::{Cb2003, Cb2003Fault, Cb2003Inputs, Cb2003Site};
use crate::models::sadigh_1997::{Sadigh1997, SadighFault, SadighInputs, SadighSite};
use crate::models::{Component, Imt, ModelEvaluator, StdDevType};

pub const NAME: &str = "MultiModel-2004";

/// Reference velocity the constituent rock/BC medians are taken at.
pub const VS30_REF: f64 = 760.0;

/// ln(1.15), the greater-of-two-horizontal scaling.
const GREATER_OF_TWO_LN: f64 = 0.139762;

/// SA periods every constituent resolves. 0.0 is the PGA-equivalent row.
pub const SUPPORTED_PERIODS: [f64; 12] = [
    0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0,
];

/// Newmark & Hall (1982) scalar from 1 s SA in g to PGV in cm/s, ln units.
fn newmark_hall_pgv_ln() -> f64 {
    (981.0 / (2.0 * std::f64::consts::PI * 1.65)).ln()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constituent {
    As1997,
    Cb2003,
    Bjf1997,
    Sadigh1997,
}

const FULL_ROSTER: [Constituent; 4] = [
    Constituent::As1997,
    Constituent::Cb2003,
    Constituent::Bjf1997,
    Constituent::Sadigh1997,
];

/// BJF tops out at 2 s, so long-period SA averages over the other three.
const LONG_PERIOD_ROSTER: [Constituent; 3] = [
    Constituent::As1997,
    Constituent::Cb2003,
    Constituent::Sadigh1997,
];

fn roster(imt: Imt) -> &'static [Constituent] {
    match imt {
        Imt::Sa(per) if per >= 3.0 => &LONG_PERIOD_ROSTER,
        _ => &FULL_ROSTER,
    }
}

/// The IMT a constituent is actually asked for: PGV rides on 1 s SA.
fn constituent_imt(imt: Imt) -> Imt {
    match imt {
        Imt::Pgv => Imt::Sa(1.0),
        other => other,
    }
}

/// Scenario description shared by the four constituents. Each relation
/// consumes its own distance measure and derives its own style-of-faulting
/// category from the rake; the site vs30 enters only through the Borcherdt
/// amplification.
#[derive(Debug, Clone)]
pub struct MultiModelInputs {
    pub mag: f64,
    pub rake_deg: f64,
    pub dip_deg: f64,
    pub r_rup: f64,
    pub r_jb: f64,
    pub r_seis: f64,
    pub on_hanging_wall: bool,
    pub hanging_wall_taper: f64,
    pub vs30: f64,
}

fn as_inputs(s: &MultiModelInputs) -> As1997Inputs {
    As1997Inputs {
        mag: s.mag,
        r_rup: s.r_rup,
        fault: As1997Fault::from_rake(s.rake_deg),
        site: As1997Site::Rock,
        on_hanging_wall: s.on_hanging_wall,
    }
}

fn cb_inputs(s: &MultiModelInputs) -> Cb2003Inputs {
    Cb2003Inputs {
        mag: s.mag,
        r_seis: s.r_seis,
        hanging_wall_taper: s.hanging_wall_taper,
        fault: Cb2003Fault::from_rake_dip(s.rake_deg, s.dip_deg),
        site: Cb2003Site::NehrpBc,
    }
}

fn sadigh_inputs(s: &MultiModelInputs) -> SadighInputs {
    SadighInputs {
        mag: s.mag,
        r_rup: s.r_rup,
        fault: SadighFault::from_rake(s.rake_deg),
        site: SadighSite::Rock,
    }
}

fn bjf_inputs(s: &MultiModelInputs) -> Bjf1997Inputs {
    Bjf1997Inputs {
        mag: s.mag,
        r_jb: s.r_jb,
        fault: Bjf1997Fault::from_rake(s.rake_deg),
        vs30: VS30_REF,
    }
}

pub struct MultiModel2004 {
    as_1997: As1997,
    cb_2003: Cb2003,
    bjf_1997: Bjf1997,
    sadigh_1997: Sadigh1997,
    component: Component,
}

impl MultiModel2004 {
    pub fn new() -> GfResult<Self> {
        Ok(MultiModel2004 {
            as_1997: As1997::for_component(Component::AverageHorizontal)?,
            cb_2003: Cb2003::for_component(Component::AverageHorizontal)?,
            // random horizontal matches the 2002 hazard-map setup
            bjf_1997: Bjf1997::for_component(Component::RandomHorizontal)?,
            sadigh_1997: Sadigh1997::for_component(Component::AverageHorizontal)?,
            component: Component::AverageHorizontal,
        })
    }

    pub fn for_component(component: Component) -> GfResult<Self> {
        match component {
            Component::AverageHorizontal | Component::GreaterOfTwoHorizontal => {
                let mut model = Self::new()?;
                model.component = component;
                Ok(model)
            }
            other => Err(GroundForgeError::UnsupportedConfiguration(format!(
                "{NAME} defines average_horizontal and greater_of_two_horizontal, got {other}"
            ))),
        }
    }

    /// Constituent mean at the BC boundary, before any amplification.
    fn bc_mean(&self, c: Constituent, s: &MultiModelInputs, imt: Imt) -> GfResult<f64> {
        match c {
            Constituent::As1997 => self.as_1997.mean(&as_inputs(s), imt),
            Constituent::Cb2003 => self.cb_2003.mean(&cb_inputs(s), imt),
            Constituent::Bjf1997 => self.bjf_1997.mean(&bjf_inputs(s), imt),
            Constituent::Sadigh1997 => self.sadigh_1997.mean(&sadigh_inputs(s), imt),
        }
    }

    /// Constituent sigma. Total maps to the magnitude-dependent total for
    /// Campbell & Bozorgnia, which defines one.
    fn bc_sigma(
        &self,
        c: Constituent,
        s: &MultiModelInputs,
        imt: Imt,
        ty: StdDevType,
    ) -> GfResult<f64> {
        match c {
            Constituent::As1997 => self.as_1997.std_dev(&as_inputs(s), imt, ty),
            Constituent::Cb2003 => {
                let ty = match ty {
                    StdDevType::Total => StdDevType::TotalMagDep,
                    other => other,
                };
                self.cb_2003.std_dev(&cb_inputs(s), imt, ty)
            }
            Constituent::Bjf1997 => self.bjf_1997.std_dev(&bjf_inputs(s), imt, ty),
            Constituent::Sadigh1997 => self.sadigh_1997.std_dev(&sadigh_inputs(s), imt, ty),
        }
    }

    /// One constituent's site-amplified ln mean for the requested measure.
    fn amplified_mean(&self, c: Constituent, s: &MultiModelInputs, imt: Imt) -> GfResult<f64> {
        let pga_bc = self.bc_mean(c, s, Imt::Pga)?;
        let mean = match imt {
            Imt::Pga => {
                let amp = siteamp::short_period_amp(s.vs30, VS30_REF, pga_bc.exp());
                pga_bc + amp.ln()
            }
            Imt::Sa(per) => {
                let sa_bc = self.bc_mean(c, s, imt)?;
                let amp = if per <= 0.5 {
                    siteamp::short_period_amp(s.vs30, VS30_REF, pga_bc.exp())
                } else {
                    siteamp::mid_period_amp(s.vs30, VS30_REF, pga_bc.exp())
                };
                sa_bc + amp.ln()
            }
            Imt::Pgv => {
                let sa_bc = self.bc_mean(c, s, Imt::Sa(1.0))?;
                let amp = siteamp::mid_period_amp(s.vs30, VS30_REF, pga_bc.exp());
                sa_bc + amp.ln() + newmark_hall_pgv_ln()
            }
            Imt::Mmi => {
                let sa_bc = self.bc_mean(c, s, Imt::Sa(1.0))?;
                // feeds ln PGA, not PGA, into the exponent lookup; kept
                // as the published ShakeMap tables were produced
                let amp_v = siteamp::mid_period_amp(s.vs30, VS30_REF, pga_bc);
                let pgv = sa_bc + amp_v.ln() + (37.27_f64 * 2.54).ln();
                let amp_a = siteamp::short_period_amp(s.vs30, VS30_REF, pga_bc.exp());
                let pga = pga_bc + amp_a.ln();
                siteamp::wald_mmi(pga.exp(), pgv.exp()).ln()
            }
        };
        Ok(match self.component {
            Component::GreaterOfTwoHorizontal => mean + GREATER_OF_TWO_LN,
            _ => mean,
        })
    }

    /// Site-amplified (mean, total sigma) per participating constituent.
    fn member_distributions(
        &self,
        s: &MultiModelInputs,
        imt: Imt,
        ty: StdDevType,
    ) -> GfResult<Vec<(f64, f64)>> {
        let cimt = constituent_imt(imt);
        roster(imt)
            .iter()
            .map(|c| {
                let mean = self.amplified_mean(*c, s, imt)?;
                let sigma = self.bc_sigma(*c, s, cimt, ty)?;
                Ok((mean, sigma))
            })
            .collect()
    }

    /// Probability that the scenario exceeds `iml_ln`, averaged over the
    /// participating constituents.
    pub fn exceed_prob(
        &self,
        s: &MultiModelInputs,
        imt: Imt,
        iml_ln: f64,
        ty: StdDevType,
        truncation: SigmaTruncation,
    ) -> GfResult<f64> {
        check_mmi_distribution(imt)?;
        check_std_dev_type(ty)?;
        let members = self.member_distributions(s, imt, ty)?;
        let sum: f64 = members
            .iter()
            .map(|(mean, sigma)| prob::exceed_prob_for(*mean, *sigma, iml_ln, truncation))
            .sum();
        Ok(sum / members.len() as f64)
    }

    /// Exceedance-probability-weighted average epsilon at `iml_ln`. None
    /// when every constituent puts zero probability on the level.
    pub fn epsilon(
        &self,
        s: &MultiModelInputs,
        imt: Imt,
        iml_ln: f64,
        ty: StdDevType,
        truncation: SigmaTruncation,
    ) -> GfResult<Option<f64>> {
        check_mmi_distribution(imt)?;
        check_std_dev_type(ty)?;
        let mut weight = 0.0;
        let mut weighted = 0.0;
        for (mean, sigma) in self.member_distributions(s, imt, ty)? {
            let p = prob::exceed_prob_for(mean, sigma, iml_ln, truncation);
            weighted += p * prob::epsilon(iml_ln, mean, sigma);
            weight += p;
        }
        if weight == 0.0 {
            Ok(None)
        } else {
            Ok(Some(weighted / weight))
        }
    }

    /// Intensity level exceeded with the given probability, averaged over
    /// constituents. The p = 0.5 case short-circuits to the mean, which is
    /// the only probability MMI supports.
    pub fn iml_at_exceed_prob(
        &self,
        s: &MultiModelInputs,
        imt: Imt,
        exceed_prob: f64,
        ty: StdDevType,
        truncation: SigmaTruncation,
    ) -> GfResult<f64> {
        if exceed_prob == 0.5 && !matches!(truncation, SigmaTruncation::OneSided(_)) {
            return self.mean(s, imt);
        }
        check_mmi_distribution(imt)?;
        check_std_dev_type(ty)?;
        let srv = prob::std_rnd_var(exceed_prob, truncation, 1e-6)?;
        let members = self.member_distributions(s, imt, ty)?;
        let sum: f64 = members
            .iter()
            .map(|(mean, sigma)| mean + srv * sigma)
            .sum();
        Ok(sum / members.len() as f64)
    }

    /// Fills an exceedance curve over ln IML levels.
    pub fn exceed_curve(
        &self,
        s: &MultiModelInputs,
        imt: Imt,
        levels: &[f64],
        ty: StdDevType,
        truncation: SigmaTruncation,
    ) -> GfResult<Vec<f64>> {
        check_mmi_distribution(imt)?;
        check_std_dev_type(ty)?;
        let members = self.member_distributions(s, imt, ty)?;
        Ok(levels
            .iter()
            .map(|iml| {
                let sum: f64 = members
                    .iter()
                    .map(|(mean, sigma)| prob::exceed_prob_for(*mean, *sigma, *iml, truncation))
                    .sum();
                sum / members.len() as f64
            })
            .collect())
    }
}

impl ModelEvaluator for MultiModel2004 {
    type Inputs = MultiModelInputs;

    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_periods(&self) -> Vec<f64> {
        SUPPORTED_PERIODS.to_vec()
    }

    fn mean(&self, inputs: &MultiModelInputs, imt: Imt) -> GfResult<f64> {
        let roster = roster(imt);
        let mut sum = 0.0;
        for c in roster {
            sum += self.amplified_mean(*c, inputs, imt)?;
        }
        Ok(sum / roster.len() as f64)
    }

    fn std_dev(&self, inputs: &MultiModelInputs, imt: Imt, ty: StdDevType) -> GfResult<f64> {
        check_std_dev_type(ty)?;
        if ty == StdDevType::None {
            return Ok(0.0);
        }
        check_mmi_distribution(imt)?;
        let cimt = constituent_imt(imt);
        let roster = roster(imt);
        let mut sum = 0.0;
        for c in roster {
            sum += self.bc_sigma(*c, inputs, cimt, ty)?;
        }
        Ok(sum / roster.len() as f64)
    }
}

/// MMI has no usable probability distribution, so everything except the
/// median is refused.
fn check_mmi_distribution(imt: Imt) -> GfResult<()> {
    if matches!(imt, Imt::Mmi) {
        return Err(GroundForgeError::UnsupportedConfiguration(format!(
            "{NAME} defines only the median for MMI, not its distribution"
        )));
    }
    Ok(())
}

fn check_std_dev_type(ty: StdDevType) -> GfResult<()> {
    match ty {
        StdDevType::Total | StdDevType::None => Ok(()),
        other => Err(GroundForgeError::UnsupportedConfiguration(format!(
            "{NAME} supports total or none sigma, got {other}"
        ))),
    }
}
