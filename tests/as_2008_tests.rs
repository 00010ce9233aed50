use groundforge::error::GroundForgeError;
use groundforge::models::as_2008::{As2008, As2008Fault, As2008Inputs};
use groundforge::models::{Component, Imt, ModelEvaluator, StdDevType, VERY_SMALL_MEAN};

fn inputs(mag: f64, r_rup: f64, vs30: f64) -> As2008Inputs {
    As2008Inputs {
        mag,
        r_rup,
        rup_minus_jb_over_rup: 0.2,
        rup_minus_x_over_rup: 0.2,
        on_hanging_wall_side: false,
        fault: As2008Fault::StrikeSlip,
        is_aftershock: false,
        dip_deg: 90.0,
        rup_width_km: 12.0,
        depth_top_km: 3.0,
        vs30,
        vs30_measured: false,
        depth_1p0_m: None,
    }
}

#[test]
fn coefficient_resource_parses_into_the_nga_period_grid() {
    let model = As2008::new().unwrap();
    let periods = model.supported_periods();
    assert_eq!(periods.len(), 23, "PGA plus 22 SA columns");
    assert_eq!(periods[0], 0.0);
    assert_eq!(*periods.last().unwrap(), 10.0);
    assert!(periods.windows(2).all(|p| p[0] < p[1]), "ascending");
}

#[test]
fn only_gm_rot_i50_is_defined() {
    assert!(As2008::for_component(Component::GmRotI50).is_ok());
    assert!(matches!(
        As2008::for_component(Component::AverageHorizontal),
        Err(GroundForgeError::UnsupportedConfiguration(_))
    ));
}

#[test]
fn motion_decays_with_distance_and_grows_with_magnitude() {
    let model = As2008::new().unwrap();
    let near = model.mean(&inputs(6.8, 10.0, 760.0), Imt::Pga).unwrap();
    let far = model.mean(&inputs(6.8, 50.0, 760.0), Imt::Pga).unwrap();
    assert!(near > far);
    let small = model.mean(&inputs(5.5, 20.0, 760.0), Imt::Pga).unwrap();
    let large = model.mean(&inputs(7.5, 20.0, 760.0), Imt::Pga).unwrap();
    assert!(large > small);
}

#[test]
fn softer_sites_amplify_one_second_motion() {
    let model = As2008::new().unwrap();
    let soft = model.mean(&inputs(6.8, 30.0, 360.0), Imt::Sa(1.0)).unwrap();
    let rock = model.mean(&inputs(6.8, 30.0, 760.0), Imt::Sa(1.0)).unwrap();
    assert!(soft > rock);
}

#[test]
fn normal_faulting_lowers_the_median_by_a13() {
    let model = As2008::new().unwrap();
    // at 1100 m/s the site and basin terms drop out of the difference
    let ss = model.mean(&inputs(6.8, 15.0, 1100.0), Imt::Pga).unwrap();
    let nm = {
        let mut i = inputs(6.8, 15.0, 1100.0);
        i.fault = As2008Fault::Normal;
        model.mean(&i, Imt::Pga).unwrap()
    };
    assert!((ss - nm - 0.06).abs() < 1e-12);
    // reverse carries a zero PGA coefficient in this relation
    let rv = {
        let mut i = inputs(6.8, 15.0, 1100.0);
        i.fault = As2008Fault::Reverse;
        model.mean(&i, Imt::Pga).unwrap()
    };
    assert!((rv - ss).abs() < 1e-12);
}

#[test]
fn aftershocks_are_penalized_by_a15() {
    let model = As2008::new().unwrap();
    let main = model.mean(&inputs(6.8, 15.0, 1100.0), Imt::Pga).unwrap();
    let after = {
        let mut i = inputs(6.8, 15.0, 1100.0);
        i.is_aftershock = true;
        model.mean(&i, Imt::Pga).unwrap()
    };
    assert!((main - after - 0.35).abs() < 1e-12);
}

#[test]
fn hanging_wall_sites_get_the_tapered_f4_term() {
    let model = As2008::new().unwrap();
    let base = As2008Inputs {
        mag: 7.0,
        r_rup: 12.0,
        rup_minus_jb_over_rup: 0.5,
        rup_minus_x_over_rup: 1.0 / 3.0,
        on_hanging_wall_side: false,
        fault: As2008Fault::Reverse,
        is_aftershock: false,
        dip_deg: 45.0,
        rup_width_km: 10.0,
        depth_top_km: 5.0,
        vs30: 1100.0,
        vs30_measured: false,
        depth_1p0_m: None,
    };
    let footwall = model.mean(&base, Imt::Pga).unwrap();
    let hanging = {
        let mut i = base.clone();
        i.on_hanging_wall_side = true;
        model.mean(&i, Imt::Pga).unwrap()
    };
    // rJB 6 km: T1 = 0.8; rX beyond the width projection: T2 = T3 = 1;
    // M 7 and a 45 degree dip leave T4 = T5 = 1; a14 is 1.08 at PGA
    assert!((hanging - footwall - 1.08 * 0.8).abs() < 1e-12);
}

#[test]
fn total_sigma_is_the_rss_of_inter_and_intra() {
    let model = As2008::new().unwrap();
    let i = inputs(6.8, 15.0, 400.0);
    for imt in [Imt::Pga, Imt::Sa(0.3), Imt::Sa(1.0), Imt::Pgv] {
        let total = model.std_dev(&i, imt, StdDevType::Total).unwrap();
        let inter = model.std_dev(&i, imt, StdDevType::Inter).unwrap();
        let intra = model.std_dev(&i, imt, StdDevType::Intra).unwrap();
        assert!(
            (total * total - inter * inter - intra * intra).abs() < 1e-12,
            "{imt}"
        );
        assert!(intra > inter, "{imt}: within-event scatter dominates");
    }
}

#[test]
fn measured_vs30_narrows_the_scatter() {
    let model = As2008::new().unwrap();
    let estimated = inputs(6.0, 15.0, 400.0);
    let measured = {
        let mut i = estimated.clone();
        i.vs30_measured = true;
        i
    };
    let s_est = model
        .std_dev(&estimated, Imt::Pga, StdDevType::Total)
        .unwrap();
    let s_meas = model
        .std_dev(&measured, Imt::Pga, StdDevType::Total)
        .unwrap();
    assert!(s_meas < s_est);
}

#[test]
fn sigma_couples_to_the_rock_pga_on_soft_sites() {
    let model = As2008::new().unwrap();
    // below vlin the nonlinear site term folds PGA scatter into SA; the
    // coupling grows with shaking level, shrinking intra at short range
    let near = model
        .std_dev(&inputs(7.5, 5.0, 270.0), Imt::Sa(0.3), StdDevType::Intra)
        .unwrap();
    let far = model
        .std_dev(&inputs(7.5, 200.0, 270.0), Imt::Sa(0.3), StdDevType::Intra)
        .unwrap();
    assert!(near < far, "{near} vs {far}");
}

#[test]
fn long_periods_ride_the_constant_displacement_tail() {
    let model = As2008::new().unwrap();
    // M 5: Td is about 1.8 s, so 3 and 10 s sit on the 1/T^2 decay
    let sa3 = model.mean(&inputs(5.0, 20.0, 760.0), Imt::Sa(3.0)).unwrap();
    let sa10 = model.mean(&inputs(5.0, 20.0, 760.0), Imt::Sa(10.0)).unwrap();
    assert!(sa3 > sa10);
    assert!(sa10.is_finite());
}

#[test]
fn pgv_has_its_own_column() {
    let model = As2008::new().unwrap();
    let pgv = model.mean(&inputs(6.8, 15.0, 400.0), Imt::Pgv).unwrap();
    assert!(pgv.is_finite());
    assert!(model
        .std_dev(&inputs(6.8, 15.0, 400.0), Imt::Pgv, StdDevType::Total)
        .is_ok());
}

#[test]
fn rejects_what_it_does_not_define() {
    let model = As2008::new().unwrap();
    let i = inputs(6.8, 15.0, 400.0);
    assert!(matches!(
        model.mean(&i, Imt::Mmi),
        Err(GroundForgeError::UnsupportedConfiguration(_))
    ));
    assert!(matches!(
        model.mean(&i, Imt::Sa(0.85)),
        Err(GroundForgeError::UnknownPeriod { .. })
    ));
    for ty in [StdDevType::TotalMagDep, StdDevType::TotalPgaDep] {
        assert!(model.std_dev(&i, Imt::Pga, ty).is_err(), "{ty}");
    }
    assert_eq!(model.std_dev(&i, Imt::Pga, StdDevType::None).unwrap(), 0.0);
}

#[test]
fn beyond_the_cutoff_is_negligible_motion() {
    let model = As2008::new().unwrap().with_max_distance(200.0);
    assert_eq!(
        model.mean(&inputs(6.8, 250.0, 760.0), Imt::Pga).unwrap(),
        VERY_SMALL_MEAN
    );
}
