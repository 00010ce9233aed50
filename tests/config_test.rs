use groundforge::config::{EvaluationParams, SiteParams, DEFAULT_VS30};
use groundforge::error::GroundForgeError;
use groundforge::geo::GeoPoint;
use groundforge::models::{Component, Imt, StdDevType};
use groundforge::prob::SigmaTruncation;
use groundforge::surface::SiteDescriptor;

// Build the flag structs directly; Clap parsing itself is not under test.
fn cli_defaults() -> EvaluationParams {
    EvaluationParams {
        component: None,
        std_dev_type: "total".to_string(),
        sigma_trunc_type: "none".to_string(),
        sigma_trunc_level: 3.0,
        max_distance: None,
    }
}

fn site_flags() -> SiteParams {
    SiteParams {
        vs30: None,
        vs30_measured: false,
        depth_1p0: None,
    }
}

fn scenario_site() -> SiteDescriptor {
    SiteDescriptor {
        location: GeoPoint::surface(34.05, -118.25),
        vs30: Some(300.0),
        vs30_measured: false,
        depth_1p0_m: Some(400.0),
    }
}

#[test]
fn test_component_defaults_to_the_models_native() {
    assert_eq!(cli_defaults().component().unwrap(), None);
}

#[test]
fn test_component_parsing() {
    let mut params = cli_defaults();
    params.component = Some("gm_rot_i50".to_string());
    assert_eq!(params.component().unwrap(), Some(Component::GmRotI50));

    params.component = Some("greater_of_two_horizontal".to_string());
    assert_eq!(
        params.component().unwrap(),
        Some(Component::GreaterOfTwoHorizontal)
    );
}

#[test]
fn test_component_parsing_rejects_unknown_names() {
    let mut params = cli_defaults();
    params.component = Some("sideways".to_string());
    let err = params.component().unwrap_err();
    assert!(matches!(err, GroundForgeError::Config(_)));
    let msg = err.to_string();
    assert!(msg.contains("sideways"));
    assert!(
        msg.contains("gm_rot_i50"),
        "the options list should name every component: {msg}"
    );
}

#[test]
fn test_std_dev_type_parsing() {
    assert_eq!(cli_defaults().std_dev_type().unwrap(), StdDevType::Total);

    let mut params = cli_defaults();
    params.std_dev_type = "total_mag_dep".to_string();
    assert_eq!(params.std_dev_type().unwrap(), StdDevType::TotalMagDep);

    params.std_dev_type = "sigma".to_string();
    assert!(matches!(
        params.std_dev_type().unwrap_err(),
        GroundForgeError::Config(_)
    ));
}

#[test]
fn test_truncation_assembles_type_and_level() {
    let mut params = cli_defaults();
    assert_eq!(params.truncation().unwrap(), SigmaTruncation::None);

    params.sigma_trunc_type = "two_sided".to_string();
    assert_eq!(params.truncation().unwrap(), SigmaTruncation::TwoSided(3.0));

    params.sigma_trunc_type = "one_sided".to_string();
    params.sigma_trunc_level = 0.0;
    assert_eq!(params.truncation().unwrap(), SigmaTruncation::OneSided(0.0));
}

#[test]
fn test_truncation_levels_are_validated() {
    let mut params = cli_defaults();
    params.sigma_trunc_type = "two_sided".to_string();
    params.sigma_trunc_level = 0.0;
    assert!(matches!(
        params.truncation().unwrap_err(),
        GroundForgeError::Config(_)
    ));

    params.sigma_trunc_type = "one_sided".to_string();
    params.sigma_trunc_level = -0.5;
    assert!(matches!(
        params.truncation().unwrap_err(),
        GroundForgeError::Config(_)
    ));

    params.sigma_trunc_type = "clipped".to_string();
    params.sigma_trunc_level = 3.0;
    assert!(matches!(
        params.truncation().unwrap_err(),
        GroundForgeError::Config(_)
    ));
}

#[test]
fn test_site_resolution_layers_cli_over_scenario() {
    let flags = SiteParams {
        vs30: Some(520.0),
        vs30_measured: true,
        depth_1p0: Some(250.0),
    };
    let resolved = flags.resolve(&scenario_site());
    assert_eq!(resolved.vs30, 520.0);
    assert!(resolved.vs30_measured);
    assert_eq!(resolved.depth_1p0_m, Some(250.0));
}

#[test]
fn test_site_resolution_falls_back_to_the_scenario() {
    let resolved = site_flags().resolve(&scenario_site());
    assert_eq!(resolved.vs30, 300.0);
    assert!(!resolved.vs30_measured);
    assert_eq!(resolved.depth_1p0_m, Some(400.0));
}

#[test]
fn test_site_resolution_defaults_to_the_bc_boundary() {
    let bare = SiteDescriptor::at(GeoPoint::surface(34.05, -118.25));
    let resolved = site_flags().resolve(&bare);
    assert_eq!(resolved.vs30, DEFAULT_VS30);
    assert!(!resolved.vs30_measured);
    assert_eq!(resolved.depth_1p0_m, None);
}

#[test]
fn test_measured_flag_survives_from_either_side() {
    let mut scenario = scenario_site();
    scenario.vs30_measured = true;
    let resolved = site_flags().resolve(&scenario);
    assert!(resolved.vs30_measured);
}

#[test]
fn test_imt_round_trips_through_strings() {
    assert_eq!("pga".parse::<Imt>().unwrap(), Imt::Pga);
    assert_eq!("pgv".parse::<Imt>().unwrap(), Imt::Pgv);
    assert_eq!("mmi".parse::<Imt>().unwrap(), Imt::Mmi);
    assert_eq!("sa:0.3".parse::<Imt>().unwrap(), Imt::Sa(0.3));

    assert_eq!(Imt::Pga.to_string(), "PGA");
    assert_eq!(Imt::Sa(0.3).to_string(), "SA (0.3 s)");
    assert_eq!(Imt::Sa(1.0).to_string(), "SA (1 s)");
}

#[test]
fn test_imt_rejects_malformed_spectral_periods() {
    assert!(matches!(
        "sa:".parse::<Imt>().unwrap_err(),
        GroundForgeError::Config(_)
    ));
    assert!(matches!(
        "sa:fast".parse::<Imt>().unwrap_err(),
        GroundForgeError::Config(_)
    ));
    assert!(matches!(
        "PGA".parse::<Imt>().unwrap_err(),
        GroundForgeError::Config(_)
    ));
}
