//! Frequency-dependent site amplification after Borcherdt (1994), plus the
//! Wald et al. (1999) instrumental-intensity conversion. Amplification is
//! `(vs30_ref / vs30)^m` with the exponent interpolated against the rock
//! PGA level, so soft sites amplify less as shaking gets stronger.

/// Rock PGA anchors (g) the exponent tables are defined at.
const PGA_ANCHORS: [f64; 4] = [0.1, 0.2, 0.3, 0.4];
/// Short-period exponents at the anchors.
const MA: [f64; 4] = [0.35, 0.25, 0.10, -0.05];
/// Mid-period exponents at the anchors.
const MV: [f64; 4] = [0.65, 0.60, 0.53, 0.45];

/// Exponent at the given rock PGA, linear between anchors and clamped to
/// the end values outside them.
fn exponent(table: &[f64; 4], pga_rock_g: f64) -> f64 {
    if pga_rock_g <= PGA_ANCHORS[0] {
        return table[0];
    }
    if pga_rock_g >= PGA_ANCHORS[3] {
        return table[3];
    }
    let mut i = 0;
    while pga_rock_g > PGA_ANCHORS[i + 1] {
        i += 1;
    }
    let frac = (pga_rock_g - PGA_ANCHORS[i]) / (PGA_ANCHORS[i + 1] - PGA_ANCHORS[i]);
    table[i] + frac * (table[i + 1] - table[i])
}

/// Short-period amplification factor (PGA and SA at 0.5 s and below).
pub fn short_period_amp(vs30: f64, vs30_ref: f64, pga_rock_g: f64) -> f64 {
    (vs30_ref / vs30).powf(exponent(&MA, pga_rock_g))
}

/// Mid-period amplification factor (SA above 0.5 s, and PGV).
pub fn mid_period_amp(vs30: f64, vs30_ref: f64, pga_rock_g: f64) -> f64 {
    (vs30_ref / vs30).powf(exponent(&MV, pga_rock_g))
}

/// Instrumental Modified Mercalli intensity from PGA (g) and PGV (cm/s).
/// PGA carries the low intensities and PGV the high ones, blended linearly
/// between MMI 5 and 7; the result is clamped to [1, 10].
pub fn wald_mmi(pga_g: f64, pgv_cms: f64) -> f64 {
    let mmi_pga = 3.66 * (pga_g * 980.0).log10() - 1.66;
    let mmi_pgv = 3.47 * pgv_cms.log10() + 2.35;
    let scale = ((mmi_pga - 5.0) / 2.0).clamp(0.0, 1.0);
    (mmi_pgv * scale + mmi_pga * (1.0 - scale)).clamp(1.0, 10.0)
}
