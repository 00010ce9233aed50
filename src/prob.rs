use serde::{Deserialize, Serialize};

use crate::error::{GfResult, GroundForgeError};

// Abramowitz & Stegun polynomial coefficients
const D1: f64 = 0.0498673470;
const D2: f64 = 0.0211410061;
const D3: f64 = 0.0032776263;
const D4: f64 = 0.0000380036;
const D5: f64 = 0.0000488906;
const D6: f64 = 0.0000053830;

/// How the lognormal distribution is truncated when converting a standard
/// random variable to an exceedance probability. Levels are in units of
/// sigma and must be positive (two-sided) or non-negative (one-sided).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SigmaTruncation {
    None,
    /// Upper truncation only.
    OneSided(f64),
    /// Symmetric truncation at +/- the level.
    TwoSided(f64),
}

impl SigmaTruncation {
    /// Builds a truncation after range-checking the level.
    pub fn validated(self) -> GfResult<Self> {
        match self {
            SigmaTruncation::TwoSided(level) if level <= 0.0 => {
                Err(GroundForgeError::Config(format!(
                    "two-sided truncation level must be positive, got {level}"
                )))
            }
            SigmaTruncation::OneSided(level) if level < 0.0 => {
                Err(GroundForgeError::Config(format!(
                    "truncation level cannot be negative, got {level}"
                )))
            }
            other => Ok(other),
        }
    }
}

/// Standard normal CDF via the Abramowitz & Stegun polynomial. Relative
/// error grows in the far lower tail (below about -4) but is negligible for
/// hazard work; exact enough everywhere above.
pub fn gauss_cdf(srv: f64) -> f64 {
    let val = srv.abs();
    let result = 0.5
        * ((((((D6 * val + D5) * val + D4) * val + D3) * val + D2) * val + D1) * val + 1.0)
            .powi(-16);
    if srv < 0.0 {
        result
    } else {
        1.0 - result
    }
}

/// Probability of exceeding `srv` under the given truncation. Truncated
/// forms renormalize to the retained mass.
pub fn exceed_prob(srv: f64, truncation: SigmaTruncation) -> f64 {
    let prob = gauss_cdf(srv);
    match truncation {
        SigmaTruncation::None => 1.0 - prob,
        SigmaTruncation::OneSided(level) => {
            if srv > level {
                0.0
            } else {
                let p_up = gauss_cdf(level);
                1.0 - prob / p_up
            }
        }
        SigmaTruncation::TwoSided(level) => {
            if srv > level {
                0.0
            } else if srv < -level {
                1.0
            } else {
                let p_up = gauss_cdf(level);
                let p_low = gauss_cdf(-level);
                (p_up - prob) / (p_up - p_low)
            }
        }
    }
}

/// Probability that ground motion with the given lognormal mean/sigma
/// exceeds `iml` (all in ln units). Zero sigma degenerates to a step.
pub fn exceed_prob_for(mean: f64, sigma: f64, iml: f64, truncation: SigmaTruncation) -> f64 {
    if sigma == 0.0 {
        if iml > mean {
            0.0
        } else {
            1.0
        }
    } else {
        exceed_prob((iml - mean) / sigma, truncation)
    }
}

/// Number of standard deviations separating `iml` from the mean; truncation
/// plays no part.
pub fn epsilon(iml: f64, mean: f64, sigma: f64) -> f64 {
    (iml - mean) / sigma
}

/// Inverse of `exceed_prob`: the standard random variable whose exceedance
/// probability matches the target within `tolerance` (relative). Searches by
/// progressive grid refinement from the center out, returning the first
/// match, so results are biased toward zero by up to the tolerance.
pub fn std_rnd_var(
    exceed_probability: f64,
    truncation: SigmaTruncation,
    tolerance: f64,
) -> GfResult<f64> {
    if !(1e-6..=0.1).contains(&tolerance) {
        return Err(GroundForgeError::Config(format!(
            "tolerance must be within [1e-6, 0.1], got {tolerance}"
        )));
    }

    if exceed_probability > 0.0 && exceed_probability <= 0.5 {
        let mut delta = 1.0f64;
        let mut old_num = -3.0;
        let mut test_num;
        loop {
            test_num = old_num;
            loop {
                test_num += delta;
                let prob = exceed_prob(test_num, truncation);
                if prob < exceed_probability + tolerance * exceed_probability {
                    break;
                }
            }
            old_num = test_num - delta;
            delta /= 10.0;
            if test_num - old_num <= tolerance {
                return Ok(test_num);
            }
        }
    } else if exceed_probability > 0.5 && exceed_probability < 1.0 {
        let mut delta = 1.0f64;
        let mut old_num = 1.0;
        let mut test_num;
        loop {
            test_num = old_num;
            loop {
                test_num -= delta;
                let prob = exceed_prob(test_num, truncation);
                if prob > exceed_probability - tolerance * exceed_probability {
                    break;
                }
            }
            old_num = test_num + delta;
            delta /= 10.0;
            if old_num - test_num <= tolerance {
                return Ok(test_num);
            }
        }
    } else if exceed_probability == 0.0 {
        match truncation {
            SigmaTruncation::None => Ok(f64::INFINITY),
            SigmaTruncation::OneSided(level) | SigmaTruncation::TwoSided(level) => Ok(level),
        }
    } else if exceed_probability == 1.0 {
        match truncation {
            SigmaTruncation::TwoSided(level) => Ok(-level),
            _ => Ok(f64::NEG_INFINITY),
        }
    } else {
        Err(GroundForgeError::Config(format!(
            "invalid exceedance probability {exceed_probability}"
        )))
    }
}

/// Intensity level (ln units) exceeded with the given probability.
pub fn iml_at_exceed_prob(
    mean: f64,
    sigma: f64,
    exceed_probability: f64,
    truncation: SigmaTruncation,
) -> GfResult<f64> {
    // the median shortcut holds for symmetric distributions only
    if exceed_probability == 0.5 && !matches!(truncation, SigmaTruncation::OneSided(_)) {
        return Ok(mean);
    }
    let srv = std_rnd_var(exceed_probability, truncation, 1e-6)?;
    Ok(mean + srv * sigma)
}

/// Fills an exceedance-probability curve over the supplied IML levels.
pub fn exceed_curve(
    mean: f64,
    sigma: f64,
    levels: &[f64],
    truncation: SigmaTruncation,
) -> Vec<f64> {
    levels
        .iter()
        .map(|iml| exceed_prob_for(mean, sigma, *iml, truncation))
        .collect()
}
