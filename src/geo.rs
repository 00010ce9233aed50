use serde::{Deserialize, Serialize};

/// Mean earth radius (km) used by every spherical calculation.
pub const EARTH_RADIUS_KM: f64 = 6371.0072;

/// Threshold below which cos(lat) is treated as zero (pole detection).
const POLE_TOLERANCE: f64 = 1e-12;

const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// A geographic point: latitude/longitude in decimal degrees, depth in km
/// (positive down, 0 = surface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub depth: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, depth: f64) -> Self {
        GeoPoint { lat, lon, depth }
    }

    /// A point on the surface (depth 0).
    pub fn surface(lat: f64, lon: f64) -> Self {
        GeoPoint {
            lat,
            lon,
            depth: 0.0,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    /// Displaces this point by `v` (spherical shift plus depth offset).
    pub fn shift(&self, v: &GeoVector) -> GeoPoint {
        destination(self, v.azimuth_deg.to_radians(), v.horz_km, v.vert_km)
    }
}

/// Azimuth/distance separation between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoVector {
    pub azimuth_deg: f64,
    pub horz_km: f64,
    pub vert_km: f64,
}

/// Angular separation between two points (radians), by the haversine formula.
pub fn angle(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();
    let sin_dlat_by2 = ((lat2 - lat1) / 2.0).sin();
    let sin_dlon_by2 = ((b.lon_rad() - a.lon_rad()) / 2.0).sin();
    // half-chord length
    let c = sin_dlat_by2 * sin_dlat_by2 + lat1.cos() * lat2.cos() * sin_dlon_by2 * sin_dlon_by2;
    2.0 * c.sqrt().atan2((1.0 - c).sqrt())
}

/// Great-circle surface distance in km (depths ignored).
pub fn horz_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    EARTH_RADIUS_KM * angle(a, b)
}

/// Fast surface distance in km: equirectangular approximation, good to well
/// under a meter over the few-hundred-km spans seismic hazard works with.
pub fn horz_distance_fast(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();
    let d_lat = lat1 - lat2;
    let d_lon = (a.lon_rad() - b.lon_rad()) * ((lat1 + lat2) * 0.5).cos();
    EARTH_RADIUS_KM * (d_lat * d_lat + d_lon * d_lon).sqrt()
}

/// Depth difference `b - a` in km (positive when b is deeper).
pub fn vert_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    b.depth - a.depth
}

/// Exact 3-D separation in km: chord through spheres of radius
/// (earth - depth).
pub fn linear_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let alpha = angle(a, b);
    let r1 = EARTH_RADIUS_KM - a.depth;
    let r2 = EARTH_RADIUS_KM - b.depth;
    let chord_b = r1 * alpha.sin();
    let chord_c = r2 - r1 * alpha.cos();
    (chord_b * chord_b + chord_c * chord_c).sqrt()
}

/// Fast 3-D separation in km (fast horizontal + vertical, RSS).
pub fn linear_distance_fast(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let h = horz_distance_fast(a, b);
    let v = vert_distance(a, b);
    (h * h + v * v).sqrt()
}

/// Initial bearing from `a` to `b` in radians, [0, 2pi).
pub fn azimuth_rad(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();

    // starting at a pole every direction is the same; return due S or N
    if lat1.cos() < POLE_TOLERANCE {
        return if lat1 > 0.0 { std::f64::consts::PI } else { 0.0 };
    }

    let d_lon = b.lon_rad() - a.lon_rad();
    let cos_lat2 = lat2.cos();
    let az = (d_lon.sin() * cos_lat2).atan2(lat1.cos() * lat2.sin() - lat1.sin() * cos_lat2 * d_lon.cos());
    (az + TWO_PI) % TWO_PI
}

/// Initial bearing from `a` to `b` in decimal degrees, [0, 360).
pub fn azimuth(a: &GeoPoint, b: &GeoPoint) -> f64 {
    azimuth_rad(a, b).to_degrees()
}

/// Point reached from `origin` after travelling `horz_km` along the bearing
/// `az_rad` (radians) and `vert_km` straight down.
pub fn destination(origin: &GeoPoint, az_rad: f64, horz_km: f64, vert_km: f64) -> GeoPoint {
    let lat = origin.lat_rad();
    let lon = origin.lon_rad();
    let sin_lat1 = lat.sin();
    let cos_lat1 = lat.cos();
    let ad = horz_km / EARTH_RADIUS_KM;
    let sin_d = ad.sin();
    let cos_d = ad.cos();

    let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * az_rad.cos()).asin();
    let lon2 = lon + (az_rad.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());

    GeoPoint {
        lat: lat2.to_degrees(),
        lon: lon2.to_degrees(),
        depth: origin.depth + vert_km,
    }
}

/// The azimuth/horizontal/vertical separation from `a` to `b`;
/// `a.shift(&vector(a, b))` recovers `b`.
pub fn vector(a: &GeoPoint, b: &GeoPoint) -> GeoVector {
    GeoVector {
        azimuth_deg: azimuth(a, b),
        horz_km: horz_distance(a, b),
        vert_km: vert_distance(a, b),
    }
}

/// Signed shortest surface distance (km) from point `p3` to the great-circle
/// segment `p1`-`p2`: positive right of the line looking from p1 to p2,
/// negative left. Beyond either endpoint the (unsigned) distance to the
/// nearer endpoint is returned instead.
pub fn distance_to_line(p1: &GeoPoint, p2: &GeoPoint, p3: &GeoPoint) -> f64 {
    let ad13 = angle(p1, p3);
    let d_az = azimuth_rad(p1, p3) - azimuth_rad(p1, p2);

    // cross-track and along-track distances
    let xtd = (ad13.sin() * d_az.sin()).asin();
    let atd = (ad13.cos() / xtd.cos()).acos() * EARTH_RADIUS_KM;

    if atd > horz_distance(p1, p2) {
        return horz_distance(p2, p3);
    }
    if d_az.cos() < 0.0 {
        return horz_distance(p1, p3);
    }
    xtd * EARTH_RADIUS_KM
}

/// Fast unsigned distance (km) from `p3` to the segment `p1`-`p2`: the
/// segment is projected onto a plane scaled at a longitude blend weighted
/// toward `p3`, then ordinary point-to-segment distance applies.
pub fn distance_to_line_fast(p1: &GeoPoint, p2: &GeoPoint, p3: &GeoPoint) -> f64 {
    let lat1 = p1.lat_rad();
    let lat2 = p2.lat_rad();
    let lat3 = p3.lat_rad();
    let lon_scale = (0.5 * lat3 + 0.25 * lat1 + 0.25 * lat2).cos();

    // segment endpoints relative to p3
    let x1 = (p1.lon_rad() - p3.lon_rad()) * lon_scale;
    let y1 = lat1 - lat3;
    let x2 = (p2.lon_rad() - p3.lon_rad()) * lon_scale;
    let y2 = lat2 - lat3;

    let dist = if (x1 - x2).abs() > 1e-6 {
        let m = (y2 - y1) / (x2 - x1);
        let b = y2 - m * x2;
        // foot of the perpendicular from the origin
        let xt = -m * b / (1.0 + m * m);
        let yt = m * xt + b;
        let between = if x2 > x1 {
            xt <= x2 && xt >= x1
        } else {
            xt <= x1 && xt >= x2
        };
        if between {
            (xt * xt + yt * yt).sqrt()
        } else {
            (x1 * x1 + y1 * y1).sqrt().min((x2 * x2 + y2 * y2).sqrt())
        }
    } else {
        // near-vertical segment; pick the perpendicular or nearer endpoint
        if y2 > y1 {
            if y2 <= 0.0 {
                (x2 * x2 + y2 * y2).sqrt()
            } else if y1 >= 0.0 {
                (x1 * x1 + y1 * y1).sqrt()
            } else {
                x1.abs()
            }
        } else if y1 <= 0.0 {
            (x1 * x1 + y1 * y1).sqrt()
        } else if y2 >= 0.0 {
            (x2 * x2 + y2 * y2).sqrt()
        } else {
            x1.abs()
        }
    };
    dist * EARTH_RADIUS_KM
}

/// Even-odd ray-crossing containment test over (lon, lat) vertices.
/// Boundary behavior follows the crossing count; depths are ignored.
pub fn polygon_contains(vertices: &[GeoPoint], p: &GeoPoint) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].lon, vertices[i].lat);
        let (xj, yj) = (vertices[j].lon, vertices[j].lat);
        if (yi > p.lat) != (yj > p.lat) && p.lon < (xj - xi) * (p.lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
