use std::f64::consts::{FRAC_PI_2, PI};

use groundforge::distance::{self, DistanceSet};
use groundforge::error::GroundForgeError;
use groundforge::geo::{self, GeoPoint};
use groundforge::surface::{RuptureDescriptor, RuptureSurface};

/// Two-point trace running due north from (34, -118) at the given depth.
fn north_trace(length_km: f64, depth_km: f64) -> Vec<GeoPoint> {
    let a = GeoPoint::new(34.0, -118.0, depth_km);
    let b = geo::destination(&a, 0.0, length_km, 0.0);
    vec![a, b]
}

fn surface_site(p: &GeoPoint) -> GeoPoint {
    GeoPoint::surface(p.lat, p.lon)
}

#[test]
fn point_source_suppresses_hanging_wall_and_directivity() {
    let node = GeoPoint::new(34.0, -118.0, 0.0);
    let surf = RuptureSurface::planar(&[node], 90.0, 0.0, 1.0).unwrap();
    let site = geo::destination(&node, FRAC_PI_2, 10.0, 0.0);

    let d = DistanceSet::compute(&surf, &site);
    assert!((d.r_rup - 10.0).abs() < 1e-3, "rRup {}", d.r_rup);
    assert!((d.r_jb - 10.0).abs() < 1e-3, "rJB {}", d.r_jb);
    assert_eq!(d.rup_minus_jb_over_rup, 0.0);

    // surface node gets floored to 3 km depth for the seismogenic distance
    let expected_seis = (d.r_jb * d.r_jb + 9.0).sqrt();
    assert!((d.r_seis - expected_seis).abs() < 1e-9);
    assert!(d.r_seis > d.r_rup);

    assert!(!d.hanging_wall);
    assert_eq!(d.hanging_wall_taper, 0.0);
    assert_eq!(d.r_x, 0.0);

    let hyp = GeoPoint::new(34.0, -118.0, 5.0);
    let dir = distance::directivity(&surf, &hyp, &site);
    assert!(matches!(dir, Err(GroundForgeError::Geometry(_))));
}

#[test]
fn site_over_a_dipping_rupture_gets_full_hanging_wall_credit() {
    // 4 km reverse trace at 1 km depth, dip 45, 10 km wide: the projection
    // extends ~7 km east of the trace
    let surf = RuptureSurface::planar(&north_trace(4.0, 1.0), 45.0, 10.0, 1.0).unwrap();
    assert_eq!(surf.cols, 5);

    let mid = surf.get(0, 2);
    let site = surface_site(&geo::destination(mid, FRAC_PI_2, 3.0, 0.0));
    let d = DistanceSet::compute(&surf, &site);

    assert_eq!(d.r_jb, 0.0, "site sits over the surface projection");
    assert_eq!(d.hanging_wall_taper, 1.0, "no distance decay at rJB 0");
    assert!(d.hanging_wall);
    assert!(d.r_rup > 0.0);
    assert_eq!(d.rup_minus_jb_over_rup, 1.0);

    assert!((d.r_x - 3.0).abs() < 0.02, "rX {}", d.r_x);
    assert!(d.x_side_hanging_wall());
}

#[test]
fn footwall_site_gets_negative_x_and_no_hanging_wall() {
    let surf = RuptureSurface::planar(&north_trace(4.0, 1.0), 45.0, 10.0, 1.0).unwrap();
    let mid = surf.get(0, 2);
    let west = FRAC_PI_2 + PI;
    let site = surface_site(&geo::destination(mid, west, 3.0, 0.0));
    let d = DistanceSet::compute(&surf, &site);

    assert!((d.r_x + 3.0).abs() < 0.02, "rX {}", d.r_x);
    assert!(!d.x_side_hanging_wall());
    assert!(!d.hanging_wall);
    assert!((d.r_jb - 3.0).abs() < 1e-3);
    assert!((d.hanging_wall_taper - 0.4).abs() < 1e-3, "(5 - 3) / 5");
    assert!((d.r_rup - 10.0f64.sqrt()).abs() < 1e-2, "3 km out, 1 km down");

    let ratio = (d.r_rup + d.r_x) / d.r_rup;
    assert!((d.rup_minus_x_over_rup - ratio).abs() < 1e-12);
}

#[test]
fn steep_dip_suppresses_hanging_wall_even_over_the_rupture() {
    let surf = RuptureSurface::planar(&north_trace(4.0, 0.5), 71.0, 8.0, 1.0).unwrap();
    let mid = surf.get(0, 2);
    let site = surface_site(&geo::destination(mid, FRAC_PI_2, 1.0, 0.0));
    let d = DistanceSet::compute(&surf, &site);

    assert_eq!(d.r_jb, 0.0);
    assert!(!d.hanging_wall, "dip 71 suppresses the polygon flag");
    assert_eq!(d.hanging_wall_taper, 0.0, "dip 71 suppresses the taper");
}

#[test]
fn seismogenic_distance_equals_rup_for_deep_ruptures() {
    let surf = RuptureSurface::planar(&north_trace(6.0, 5.0), 50.0, 6.0, 1.0).unwrap();
    let site = GeoPoint::surface(34.1, -117.8);
    let d = DistanceSet::compute(&surf, &site);
    assert_eq!(d.r_seis, d.r_rup, "nothing above the 3 km floor");
}

#[test]
fn site_on_a_grid_node_zeroes_everything() {
    let surf = RuptureSurface::planar(&north_trace(6.0, 0.0), 60.0, 0.0, 1.0).unwrap();
    let site = *surf.get(0, 3);
    let d = DistanceSet::compute(&surf, &site);

    assert_eq!(d.r_rup, 0.0);
    assert_eq!(d.r_jb, 0.0);
    assert_eq!(d.rup_minus_jb_over_rup, 0.0, "ratio guard at rRup 0");
    assert_eq!(d.rup_minus_x_over_rup, 0.0);
    assert_eq!(d.r_x, 0.0, "site exactly on the strike line");
    assert_eq!(d.hanging_wall_taper, 1.0, "line source at dip 60 still tapers");
}

#[test]
fn directivity_along_strike_site() {
    let surf = RuptureSurface::planar(&north_trace(10.0, 0.0), 90.0, 8.0, 1.0).unwrap();
    let south_end = *surf.get(0, 0);
    let north_end = *surf.get(0, surf.cols - 1);
    let hyp = GeoPoint::new(south_end.lat, south_end.lon, 6.0);

    // rupture propagates north, straight at a site past the far end
    let site = geo::destination(&north_end, 0.0, 5.0, 0.0);
    let dir = distance::directivity(&surf, &hyp, &site).unwrap();
    assert!((dir.x - 1.0).abs() < 1e-6, "full rupture length between hyp and site");
    assert!(dir.theta_deg.abs() < 1e-6, "theta {}", dir.theta_deg);
}

#[test]
fn directivity_theta_defaults_when_hypocenter_is_the_closest_point() {
    let surf = RuptureSurface::planar(&north_trace(10.0, 0.0), 90.0, 8.0, 1.0).unwrap();
    let south_end = *surf.get(0, 0);
    let hyp = GeoPoint::new(south_end.lat, south_end.lon, 6.0);

    let site = geo::destination(&south_end, PI, 5.0, 0.0);
    let dir = distance::directivity(&surf, &hyp, &site).unwrap();
    assert!(dir.x.abs() < 1e-9);
    assert_eq!(dir.theta_deg, 90.0);
}

#[test]
fn directivity_theta_signs_off_strike() {
    let surf = RuptureSurface::planar(&north_trace(10.0, 0.0), 90.0, 8.0, 1.0).unwrap();
    let south_end = *surf.get(0, 0);
    let north_end = *surf.get(0, surf.cols - 1);
    let hyp = GeoPoint::new(south_end.lat, south_end.lon, 6.0);

    // site northeast of the far end: bearing to site ~9.9 degrees, bearing
    // to the closest trace point 0, so theta comes out negative
    let site = geo::destination(&north_end, std::f64::consts::FRAC_PI_4, 3.0, 0.0);
    let dir = distance::directivity(&surf, &hyp, &site).unwrap();
    assert!((dir.theta_deg + 9.93).abs() < 0.2, "theta {}", dir.theta_deg);
    assert!((-90.0..=90.0).contains(&dir.theta_deg));
}

#[test]
fn directivity_for_needs_a_hypocenter() {
    let surf = RuptureSurface::planar(&north_trace(10.0, 0.0), 90.0, 8.0, 1.0).unwrap();
    let site = GeoPoint::surface(34.2, -117.9);

    let mut rupture = RuptureDescriptor {
        mag: 6.5,
        surface: surf,
        ave_rake: 0.0,
        hypocenter: None,
        is_aftershock: false,
    };
    assert!(matches!(
        distance::directivity_for(&rupture, &site),
        Err(GroundForgeError::ParameterNotSet("hypocenter"))
    ));

    rupture.hypocenter = Some(GeoPoint::new(34.0, -118.0, 7.0));
    assert!(distance::directivity_for(&rupture, &site).is_ok());
}

#[test]
fn jb_never_exceeds_rup_across_a_site_ring() {
    let surf = RuptureSurface::planar(&north_trace(12.0, 2.0), 40.0, 9.0, 1.0).unwrap();
    let center = *surf.get(0, surf.cols / 2);
    for step in 0..24 {
        let az = f64::from(step) * 15.0;
        let site = surface_site(&geo::destination(&center, az.to_radians(), 17.0, 0.0));
        let d = DistanceSet::compute(&surf, &site);
        assert!(d.r_jb <= d.r_rup + 1e-9, "az {az}: rJB {} > rRup {}", d.r_jb, d.r_rup);
        assert!(d.r_rup >= 0.0);
        assert!((0.0..=1.0).contains(&d.hanging_wall_taper));
    }
}
