use serde::{Deserialize, Serialize};

use crate::error::{GfResult, GroundForgeError};
use crate::geo::{self, GeoPoint};
use crate::surface::{RuptureDescriptor, RuptureSurface};

/// Depth floor (km) applied to rupture nodes for the seismogenic distance.
pub const SEISMOGENIC_DEPTH_KM: f64 = 3.0;

/// How far (km) the trace endpoints are projected down-dip to build the
/// hanging-wall polygon; anything beyond the largest taper distance works.
const HANGING_WALL_REACH_KM: f64 = 100.0;

/// How far (km) the trace is extended past each end for the strike-normal
/// (rX) distance.
const STRIKE_EXTENSION_KM: f64 = 1000.0;

/// Every source-to-site distance measure the models consume, computed in one
/// pass from a rupture surface and a site location. A pure function of its
/// inputs; rebuild it whenever either changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceSet {
    /// Closest 3-D distance to the rupture (km).
    pub r_rup: f64,
    /// Closest horizontal distance to the surface projection (km); exactly
    /// zero for sites over the rupture.
    pub r_jb: f64,
    /// Closest distance to the seismogenic part of the rupture (km).
    pub r_seis: f64,
    /// Horizontal distance to the extended fault-strike line (km), positive
    /// on the hanging-wall side.
    pub r_x: f64,
    /// (rRup - rJB) / rRup, 0 when rRup is 0.
    pub rup_minus_jb_over_rup: f64,
    /// (rRup -/+ rX) / rRup depending on side, 0 when rRup is 0.
    pub rup_minus_x_over_rup: f64,
    /// Hanging-wall polygon test: site inside the trace projected 100 km
    /// down-dip. Suppressed for dip > 70 degrees and for point sources.
    pub hanging_wall: bool,
    /// Proximity taper in [0, 1]: 1 inside rJB < 1 km, ramping to 0 at
    /// rJB = 5 km; suppressed with the polygon flag's dip/point-source rules.
    pub hanging_wall_taper: f64,
}

impl DistanceSet {
    pub fn compute(surface: &RuptureSurface, site: &GeoPoint) -> DistanceSet {
        let mut r_rup = f64::MAX;
        let mut min_horz = f64::MAX;
        let mut r_seis = f64::MAX;

        for node in surface.nodes() {
            let h = geo::horz_distance_fast(site, node);
            let v = node.depth - site.depth;
            let d = (h * h + v * v).sqrt();
            if d < r_rup {
                r_rup = d;
            }
            if h < min_horz {
                min_horz = h;
            }
            let v_seis = node.depth.max(SEISMOGENIC_DEPTH_KM) - site.depth;
            let d_seis = (h * h + v_seis * v_seis).sqrt();
            if d_seis < r_seis {
                r_seis = d_seis;
            }
        }

        let over_rupture = geo::polygon_contains(&surface.perimeter(), site);
        let r_jb = if over_rupture { 0.0 } else { min_horz };

        let r_x = distance_x(surface, site);

        let (rup_minus_jb_over_rup, rup_minus_x_over_rup) = if r_rup > 0.0 {
            let jb_ratio = (r_rup - r_jb) / r_rup;
            let x_ratio = if r_x >= 0.0 {
                (r_rup - r_x) / r_rup
            } else {
                (r_rup + r_x) / r_rup
            };
            (jb_ratio, x_ratio)
        } else {
            (0.0, 0.0)
        };

        let suppressed = surface.ave_dip > 70.0 || surface.cols == 1;
        let hanging_wall = !suppressed && geo::polygon_contains(&hanging_wall_vertices(surface), site);
        let hanging_wall_taper = if suppressed {
            0.0
        } else if r_jb < 1.0 {
            1.0
        } else if r_jb < 5.0 {
            (5.0 - r_jb) / 5.0
        } else {
            0.0
        };

        DistanceSet {
            r_rup,
            r_jb,
            r_seis,
            r_x,
            rup_minus_jb_over_rup,
            rup_minus_x_over_rup,
            hanging_wall,
            hanging_wall_taper,
        }
    }

    /// Side flag carried with the rX ratio: true on the hanging wall
    /// (rX >= 0, which includes a site directly over the trace).
    pub fn x_side_hanging_wall(&self) -> bool {
        self.r_x >= 0.0
    }
}

/// Trace row plus both trace endpoints projected 100 km along their
/// column's down-dip vector; the containment region for the hanging wall.
fn hanging_wall_vertices(surface: &RuptureSurface) -> Vec<GeoPoint> {
    let cols = surface.cols;
    let rows = surface.rows;
    let mut verts = Vec::with_capacity(cols + 2);
    verts.extend_from_slice(surface.trace());

    for col in [cols - 1, 0] {
        let top = surface.get(0, col);
        let bottom = surface.get(rows - 1, col);
        let mut dir = geo::vector(top, bottom);
        dir.horz_km = HANGING_WALL_REACH_KM;
        verts.push(top.shift(&dir));
    }
    verts
}

/// Signed horizontal distance (km) from the site to the fault-strike line,
/// extended 1000 km beyond both trace ends. Positive on the down-dip side,
/// zero for point sources and sites exactly on the line.
fn distance_x(surface: &RuptureSurface, site: &GeoPoint) -> f64 {
    if surface.cols == 1 {
        return 0.0;
    }
    let trace = surface.trace();
    let n = trace.len();

    // extend past each end along the local segment azimuth
    let az_before = geo::azimuth_rad(&trace[1], &trace[0]);
    let az_after = geo::azimuth_rad(&trace[n - 2], &trace[n - 1]);
    let ext_first = geo::destination(&trace[0], az_before, STRIKE_EXTENSION_KM, 0.0);
    let ext_last = geo::destination(&trace[n - 1], az_after, STRIKE_EXTENSION_KM, 0.0);

    let mut extended = Vec::with_capacity(n + 2);
    extended.push(ext_first);
    extended.extend_from_slice(trace);
    extended.push(ext_last);

    let mut min = f64::MAX;
    for seg in extended.windows(2) {
        let d = geo::distance_to_line_fast(&seg[0], &seg[1], site);
        if d < min {
            min = d;
        }
    }
    if min == 0.0 {
        return 0.0;
    }

    // down-dip side of the extended line, swept out normal to the strike
    let down_dip_az = geo::azimuth_rad(&trace[0], &trace[n - 1]) + std::f64::consts::FRAC_PI_2;
    let mut region = extended.clone();
    region.push(geo::destination(&ext_last, down_dip_az, STRIKE_EXTENSION_KM, 0.0));
    region.push(geo::destination(&ext_first, down_dip_az, STRIKE_EXTENSION_KM, 0.0));

    if geo::polygon_contains(&region, site) {
        min
    } else {
        -min
    }
}

/// Rupture-directivity geometry: the fraction of the rupture length between
/// the hypocenter and the closest trace point, and the angle between the
/// rupture-propagation and site directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectivityParams {
    /// s / L in [0, 1].
    pub x: f64,
    /// Degrees; folded once by 360 across the north wraparound.
    pub theta_deg: f64,
}

/// Computes directivity geometry for a site. Needs a resolvable propagation
/// direction, so point-source surfaces are rejected.
pub fn directivity(
    surface: &RuptureSurface,
    hypocenter: &GeoPoint,
    site: &GeoPoint,
) -> GfResult<DirectivityParams> {
    let n = surface.cols;
    if n == 1 {
        return Err(GroundForgeError::Geometry(
            "directivity is undefined for a point source".into(),
        ));
    }
    let trace = surface.trace();

    let mut closest = &trace[0];
    let mut closest_dist = f64::MAX;
    for p in trace {
        let d = geo::horz_distance(site, p);
        if d < closest_dist {
            closest_dist = d;
            closest = p;
        }
    }

    let s = geo::horz_distance(closest, hypocenter);
    let l = geo::horz_distance(&trace[0], &trace[n - 1]);
    let mut x = s / l;
    // numerical imprecision can push s a hair past L
    if x > 1.0 && x < 1.001 {
        x = 1.0;
    }

    let theta_deg = if s > 0.01 {
        let angle1 = geo::azimuth(hypocenter, site);
        let angle2 = geo::azimuth(hypocenter, closest);
        let mut diff = angle2 - angle1;
        if diff < -90.0 {
            diff += 360.0;
        } else if diff > 90.0 {
            diff -= 360.0;
        }
        diff
    } else {
        // hypocenter sits at the closest trace point, angle undefined
        90.0
    };

    Ok(DirectivityParams { x, theta_deg })
}

/// Directivity for a full rupture descriptor; the hypocenter must be set.
pub fn directivity_for(rupture: &RuptureDescriptor, site: &GeoPoint) -> GfResult<DirectivityParams> {
    let hyp = rupture
        .hypocenter
        .as_ref()
        .ok_or(GroundForgeError::ParameterNotSet("hypocenter"))?;
    directivity(&rupture.surface, hyp, site)
}
