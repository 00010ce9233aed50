use proptest::prelude::*;

use groundforge::distance::{self, DistanceSet, SEISMOGENIC_DEPTH_KM};
use groundforge::geo::{self, GeoPoint};
use groundforge::prob::{self, SigmaTruncation};
use groundforge::surface::RuptureSurface;

prop_compose! {
    /// A single-segment rupture trace somewhere in southern California.
    fn arb_trace()(
        lat in 33.0f64..37.0,
        lon in -120.0f64..-116.0,
        strike in 0.0f64..360.0,
        length in 5.0f64..60.0,
        top in 0.0f64..8.0,
    ) -> Vec<GeoPoint> {
        let a = GeoPoint::new(lat, lon, top);
        let b = geo::destination(&a, strike.to_radians(), length, 0.0);
        vec![a, b]
    }
}

prop_compose! {
    /// A dipping planar surface; dips stay under the 70-degree gate so the
    /// hanging-wall fields are live.
    fn arb_surface()(
        trace in arb_trace(),
        dip in 15.0f64..70.0,
        width in 4.0f64..18.0,
    ) -> RuptureSurface {
        RuptureSurface::planar(&trace, dip, width, 1.0).unwrap()
    }
}

prop_compose! {
    fn arb_site()(
        lat in 32.0f64..38.0,
        lon in -121.0f64..-115.0,
    ) -> GeoPoint {
        GeoPoint::surface(lat, lon)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn joyner_boore_never_exceeds_rupture_distance(
        surface in arb_surface(),
        site in arb_site(),
    ) {
        let ds = DistanceSet::compute(&surface, &site);
        prop_assert!(ds.r_rup >= 0.0);
        prop_assert!(
            ds.r_jb <= ds.r_rup,
            "rJB {} exceeds rRup {}",
            ds.r_jb,
            ds.r_rup
        );
    }

    #[test]
    fn seismogenic_distance_is_floored(
        surface in arb_surface(),
        site in arb_site(),
    ) {
        let ds = DistanceSet::compute(&surface, &site);
        prop_assert!(ds.r_seis >= ds.r_rup, "rSeis {} < rRup {}", ds.r_seis, ds.r_rup);
        prop_assert!(
            ds.r_seis >= SEISMOGENIC_DEPTH_KM,
            "rSeis {} under the seismogenic floor",
            ds.r_seis
        );
    }

    #[test]
    fn normalized_distances_stay_bounded(
        surface in arb_surface(),
        site in arb_site(),
    ) {
        let ds = DistanceSet::compute(&surface, &site);
        prop_assert!(
            (0.0..=1.0).contains(&ds.rup_minus_jb_over_rup),
            "jb ratio {} out of range",
            ds.rup_minus_jb_over_rup
        );
        // the rX ratio has no lower bound (rX can exceed rRup over the
        // bottom edge of a shallow-dipping fault) but never exceeds one
        prop_assert!(ds.rup_minus_x_over_rup <= 1.0);
        prop_assert!(ds.rup_minus_x_over_rup.is_finite());
    }

    #[test]
    fn the_proximity_taper_tracks_joyner_boore_distance(
        surface in arb_surface(),
        site in arb_site(),
    ) {
        let ds = DistanceSet::compute(&surface, &site);
        prop_assert!((0.0..=1.0).contains(&ds.hanging_wall_taper));
        let expected = if ds.r_jb < 1.0 {
            1.0
        } else if ds.r_jb < 5.0 {
            (5.0 - ds.r_jb) / 5.0
        } else {
            0.0
        };
        prop_assert_eq!(ds.hanging_wall_taper, expected);
    }

    #[test]
    fn steep_faults_never_earn_hanging_wall_credit(
        trace in arb_trace(),
        dip in 71.0f64..89.0,
        width in 4.0f64..18.0,
        site in arb_site(),
    ) {
        let surface = RuptureSurface::planar(&trace, dip, width, 1.0).unwrap();
        let ds = DistanceSet::compute(&surface, &site);
        prop_assert!(!ds.hanging_wall);
        prop_assert_eq!(ds.hanging_wall_taper, 0.0);
    }

    #[test]
    fn directivity_fraction_is_normalized(
        surface in arb_surface(),
        site in arb_site(),
    ) {
        // a top-edge hypocenter keeps s on the trace, so s/L cannot blow up
        let hypo = surface.get(0, 0);
        let dir = distance::directivity(&surface, hypo, &site).unwrap();
        prop_assert!(
            (0.0..=1.0).contains(&dir.x),
            "rupture fraction {} out of range",
            dir.x
        );
        prop_assert!(dir.theta_deg.is_finite());
        // one wraparound fold leaves the angle within three quadrants
        prop_assert!(dir.theta_deg.abs() < 270.0, "theta {}", dir.theta_deg);
    }

    #[test]
    fn bearings_stay_on_the_compass(a in arb_site(), b in arb_site()) {
        let az = geo::azimuth(&a, &b);
        prop_assert!((0.0..360.0).contains(&az), "azimuth {}", az);
    }

    #[test]
    fn the_slant_separation_dominates_its_components(
        a in arb_site(),
        b in arb_site(),
        depth in 0.0f64..15.0,
    ) {
        let buried = GeoPoint::new(b.lat, b.lon, depth);
        let horz = geo::horz_distance(&a, &buried);
        let slant = geo::linear_distance(&a, &buried);
        prop_assert!(slant >= horz - 1e-9);
        prop_assert!(slant >= depth - 1e-9);
    }

    #[test]
    fn destination_round_trips_through_the_distance(
        origin in arb_site(),
        bearing in 0.0f64..360.0,
        horz in 0.5f64..300.0,
        vert in 0.0f64..12.0,
    ) {
        let dest = geo::destination(&origin, bearing.to_radians(), horz, vert);
        let back = geo::horz_distance(&origin, &dest);
        prop_assert!(
            (back - horz).abs() < 1e-6 * horz + 1e-9,
            "went {} km, measured {}",
            horz,
            back
        );
        prop_assert_eq!(dest.depth, origin.depth + vert);

        let az = geo::azimuth(&origin, &dest);
        let spread = (az - bearing).abs();
        prop_assert!(spread.min(360.0 - spread) < 1e-6, "bearing {} came back {}", bearing, az);
    }

    #[test]
    fn the_gaussian_cdf_is_monotone_and_symmetric(
        z in -6.0f64..6.0,
        dz in 0.0f64..3.0,
    ) {
        let lo = prob::gauss_cdf(z);
        let hi = prob::gauss_cdf(z + dz);
        prop_assert!((0.0..=1.0).contains(&lo));
        // the polynomial approximation wiggles below 1e-7
        prop_assert!(hi >= lo - 1e-7, "cdf({}) = {} > cdf({}) = {}", z, lo, z + dz, hi);
        prop_assert!(
            (prob::gauss_cdf(z) + prob::gauss_cdf(-z) - 1.0).abs() < 1e-12,
            "cdf not symmetric at {}",
            z
        );
    }

    #[test]
    fn exceedance_is_a_probability_under_any_truncation(
        srv in -5.0f64..5.0,
        level in 0.5f64..4.0,
    ) {
        for trunc in [
            SigmaTruncation::None,
            SigmaTruncation::OneSided(level),
            SigmaTruncation::TwoSided(level),
        ] {
            let p = prob::exceed_prob(srv, trunc);
            prop_assert!((0.0..=1.0).contains(&p), "p = {} at srv {} under {:?}", p, srv, trunc);
        }
        prop_assert_eq!(prob::exceed_prob(level + 0.1, SigmaTruncation::OneSided(level)), 0.0);
        prop_assert_eq!(prob::exceed_prob(level, SigmaTruncation::TwoSided(level)), 0.0);
        prop_assert_eq!(prob::exceed_prob(-level, SigmaTruncation::TwoSided(level)), 1.0);
    }

    #[test]
    fn the_standardized_variable_inverts_the_exceedance(p in 0.01f64..0.99) {
        for trunc in [SigmaTruncation::None, SigmaTruncation::TwoSided(3.0)] {
            let srv = prob::std_rnd_var(p, trunc, 1e-6).unwrap();
            let back = prob::exceed_prob(srv, trunc);
            prop_assert!(
                (back - p).abs() < 1e-3,
                "asked for {}, got back {} under {:?}",
                p,
                back,
                trunc
            );
        }
    }
}
