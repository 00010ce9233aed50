use serde::{Deserialize, Serialize};

use crate::error::{GfResult, GroundForgeError};
use crate::geo::{self, GeoPoint};

/// An evenly gridded rupture surface. Row-major storage, row 0 is the trace
/// (shallowest row), rows increase down-dip. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuptureSurface {
    points: Vec<GeoPoint>,
    pub rows: usize,
    pub cols: usize,
    pub ave_dip: f64,
    pub grid_spacing_km: f64,
}

impl RuptureSurface {
    /// Builds a planar surface: the trace is resampled along strike at the
    /// grid spacing, then each column is projected down-dip. The down-dip
    /// direction is the overall strike azimuth + 90 degrees; a single-point
    /// trace yields a single-column (point source) surface.
    pub fn planar(trace: &[GeoPoint], dip_deg: f64, width_km: f64, spacing_km: f64) -> GfResult<Self> {
        if trace.is_empty() {
            return Err(GroundForgeError::Geometry("rupture trace is empty".into()));
        }
        if !(dip_deg > 0.0 && dip_deg <= 90.0) {
            return Err(GroundForgeError::Geometry(format!(
                "dip must be in (0, 90], got {dip_deg}"
            )));
        }
        if spacing_km <= 0.0 {
            return Err(GroundForgeError::Geometry(format!(
                "grid spacing must be positive, got {spacing_km}"
            )));
        }
        if width_km < 0.0 {
            return Err(GroundForgeError::Geometry(format!(
                "down-dip width must be non-negative, got {width_km}"
            )));
        }

        let trace = resample_trace(trace, spacing_km);
        let cols = trace.len();
        let rows = if cols == 1 || width_km == 0.0 {
            1
        } else {
            (width_km / spacing_km).round() as usize + 1
        };

        let mut points = Vec::with_capacity(rows * cols);
        points.extend_from_slice(&trace);

        if rows > 1 {
            let dip_rad = dip_deg.to_radians();
            let down_dip_az =
                geo::azimuth_rad(&trace[0], &trace[cols - 1]) + std::f64::consts::FRAC_PI_2;
            for r in 1..rows {
                let w = r as f64 * spacing_km;
                let dh = w * dip_rad.cos();
                let dv = w * dip_rad.sin();
                for node in &trace {
                    points.push(geo::destination(node, down_dip_az, dh, dv));
                }
            }
        }

        Ok(RuptureSurface {
            points,
            rows,
            cols,
            ave_dip: dip_deg,
            grid_spacing_km: spacing_km,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> &GeoPoint {
        &self.points[row * self.cols + col]
    }

    /// Depth to the top of rupture (km).
    pub fn top_depth(&self) -> f64 {
        self.points[0].depth
    }

    /// Along-strike length (km), summed over the trace segments.
    pub fn surface_length(&self) -> f64 {
        self.trace()
            .windows(2)
            .map(|pair| geo::horz_distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Down-dip width (km): spacing * (rows - 1), zero for a line source.
    pub fn surface_width(&self) -> f64 {
        self.grid_spacing_km * (self.rows - 1) as f64
    }

    pub fn area(&self) -> f64 {
        self.surface_length() * self.surface_width()
    }

    /// The trace row (row 0), shallowest first-to-last along strike.
    pub fn trace(&self) -> &[GeoPoint] {
        &self.points[..self.cols]
    }

    /// All grid nodes in row-major order.
    pub fn nodes(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Boundary walk: trace left-to-right, last column down, bottom row
    /// right-to-left, first column back up. Degenerate (single row or
    /// column) surfaces return that row/column.
    pub fn perimeter(&self) -> Vec<GeoPoint> {
        if self.rows == 1 {
            return self.trace().to_vec();
        }
        if self.cols == 1 {
            return self.points.clone();
        }
        let mut out = Vec::with_capacity(2 * self.rows + 2 * self.cols);
        for c in 0..self.cols {
            out.push(*self.get(0, c));
        }
        for r in 1..self.rows {
            out.push(*self.get(r, self.cols - 1));
        }
        for c in (0..self.cols - 1).rev() {
            out.push(*self.get(self.rows - 1, c));
        }
        for r in (1..self.rows - 1).rev() {
            out.push(*self.get(r, 0));
        }
        out
    }

    /// Minimum 3-D separation (km) between the grids of two surfaces.
    pub fn min_distance(&self, other: &RuptureSurface) -> f64 {
        let mut min = f64::MAX;
        for a in self.nodes() {
            for b in other.nodes() {
                let d = geo::linear_distance_fast(a, b);
                if d < min {
                    min = d;
                }
            }
        }
        min
    }
}

/// Resamples a trace polyline into equal steps of roughly `spacing_km`,
/// keeping the original endpoints. Node depths interpolate linearly along
/// each input segment.
fn resample_trace(trace: &[GeoPoint], spacing_km: f64) -> Vec<GeoPoint> {
    if trace.len() < 2 {
        return trace.to_vec();
    }
    let seg_len: Vec<f64> = trace
        .windows(2)
        .map(|pair| geo::horz_distance(&pair[0], &pair[1]))
        .collect();
    let total: f64 = seg_len.iter().sum();
    if total == 0.0 {
        return vec![trace[0]];
    }

    let steps = ((total / spacing_km).round() as usize).max(1);
    let ds = total / steps as f64;

    let mut out = Vec::with_capacity(steps + 1);
    out.push(trace[0]);
    let mut seg = 0;
    let mut seg_start = 0.0;
    for k in 1..steps {
        let s = k as f64 * ds;
        while seg + 1 < seg_len.len() && s > seg_start + seg_len[seg] {
            seg_start += seg_len[seg];
            seg += 1;
        }
        let along = s - seg_start;
        let az = geo::azimuth_rad(&trace[seg], &trace[seg + 1]);
        let dv = if seg_len[seg] > 0.0 {
            (trace[seg + 1].depth - trace[seg].depth) * along / seg_len[seg]
        } else {
            0.0
        };
        out.push(geo::destination(&trace[seg], az, along, dv));
    }
    out.push(trace[trace.len() - 1]);
    out
}

/// Everything a ground-motion model needs to know about the earthquake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuptureDescriptor {
    pub mag: f64,
    pub surface: RuptureSurface,
    /// Average rake (degrees); each model maps this to its own category.
    pub ave_rake: f64,
    #[serde(default)]
    pub hypocenter: Option<GeoPoint>,
    #[serde(default)]
    pub is_aftershock: bool,
}

/// Everything a ground-motion model needs to know about the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDescriptor {
    pub location: GeoPoint,
    #[serde(default)]
    pub vs30: Option<f64>,
    #[serde(default)]
    pub vs30_measured: bool,
    /// Depth to the 1.0 km/s shear-wave velocity horizon (m), if known.
    #[serde(default)]
    pub depth_1p0_m: Option<f64>,
}

impl SiteDescriptor {
    pub fn at(location: GeoPoint) -> Self {
        SiteDescriptor {
            location,
            vs30: None,
            vs30_measured: false,
            depth_1p0_m: None,
        }
    }

    pub fn with_vs30(location: GeoPoint, vs30: f64) -> Self {
        SiteDescriptor {
            location,
            vs30: Some(vs30),
            vs30_measured: false,
            depth_1p0_m: None,
        }
    }
}
