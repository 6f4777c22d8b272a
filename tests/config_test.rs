mod common;

use cipherforge::config::{
    AnnealConfig, AnnealOverrides, MutationPolicy, Preset, RestartPolicy,
};
use cipherforge::error::CipherForgeError;
use cipherforge::scorer::ScoringMode;
use common::temp_file;
use rstest::rstest;
use strum::IntoEnumIterator;

#[test]
fn test_every_preset_validates() {
    for preset in Preset::iter() {
        let cfg = preset.config();
        assert!(cfg.validate().is_ok(), "{} failed validation", preset);
    }
}

#[test]
fn test_preset_shapes() {
    let playfair = Preset::Playfair.config();
    assert_eq!(playfair.restart, RestartPolicy::Hard);
    assert_eq!(playfair.mutation.reverse_weight, 0.0);

    let lane = Preset::TranspositionLane.config();
    assert_eq!(lane.mode, ScoringMode::Tolerant);
    assert_eq!(lane.mutation, MutationPolicy::default());

    let refine = Preset::SquareRefine.config();
    assert_eq!(refine.stagnation_limit, None);
    assert_eq!(refine.mutation, MutationPolicy::mixed(0.6, 0.4));
    assert_eq!(refine.mode, ScoringMode::Strict);
}

#[test]
fn test_joint_preset_mixes_order_and_letter_swaps() {
    let joint = Preset::Joint.config();
    assert_eq!(joint.initial_temperature, 40.0);
    assert_eq!(joint.cooling_rate, 0.999_99);
    assert_eq!(joint.stagnation_limit, Some(500_000));
    assert_eq!(joint.reheat_temperature, 30.0);
    assert_eq!(joint.restart, RestartPolicy::Soft);
    assert_eq!(joint.mutation.order_mutation_rate, 0.5);
    assert_eq!(joint.mutation.letters_only_rate, 0.95);
    assert_eq!(joint.mutation.reverse_weight, 0.0);
}

#[rstest]
#[case("playfair", Preset::Playfair)]
#[case("transposition-lane", Preset::TranspositionLane)]
#[case("Square-Refine", Preset::SquareRefine)]
#[case("JOINT", Preset::Joint)]
fn test_preset_names(#[case] name: &str, #[case] expected: Preset) {
    assert_eq!(name.parse::<Preset>().unwrap(), expected);
}

#[test]
fn test_enum_names_parse_case_insensitively() {
    assert_eq!("HARD".parse::<RestartPolicy>().unwrap(), RestartPolicy::Hard);
    assert_eq!("tolerant".parse::<ScoringMode>().unwrap(), ScoringMode::Tolerant);
    assert!("lukewarm".parse::<RestartPolicy>().is_err());
}

fn config_error(cfg: &AnnealConfig) -> bool {
    matches!(cfg.validate(), Err(CipherForgeError::Config(_)))
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut cfg = AnnealConfig::default();
    cfg.cooling_rate = 1.5;
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.cooling_rate = 0.0;
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.initial_temperature = -1.0;
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.mutation = MutationPolicy::mixed(0.0, 0.0);
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.mutation.order_mutation_rate = 2.0;
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.mutation.letters_only_rate = -0.1;
    assert!(config_error(&cfg));

    let mut cfg = AnnealConfig::default();
    cfg.reheat_temperature = f64::NAN;
    assert!(config_error(&cfg));
}

#[test]
fn test_profile_loads_with_defaults_for_missing_fields() {
    let file = temp_file(r#"{ "max_iterations": 500, "restart": "hard" }"#);
    let cfg = AnnealConfig::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.max_iterations, 500);
    assert_eq!(cfg.restart, RestartPolicy::Hard);
    assert_eq!(cfg.cooling_rate, AnnealConfig::default().cooling_rate);
}

#[test]
fn test_profile_is_validated() {
    let file = temp_file(r#"{ "cooling_rate": 3.0 }"#);
    assert!(matches!(
        AnnealConfig::load_from_file(file.path()),
        Err(CipherForgeError::Config(_))
    ));

    let broken = temp_file("{ not json");
    assert!(matches!(
        AnnealConfig::load_from_file(broken.path()),
        Err(CipherForgeError::Json(_))
    ));
}

#[test]
fn test_overrides_only_touch_set_fields() {
    let overrides = AnnealOverrides {
        iterations: Some(42),
        reverse_weight: Some(0.25),
        restart: Some(RestartPolicy::Soft),
        ..Default::default()
    };
    let cfg = overrides.resolve(Preset::Playfair).unwrap();
    let base = Preset::Playfair.config();

    assert_eq!(cfg.max_iterations, 42);
    assert_eq!(cfg.mutation.reverse_weight, 0.25);
    assert_eq!(cfg.restart, RestartPolicy::Soft);
    assert_eq!(cfg.cooling_rate, base.cooling_rate);
    assert_eq!(cfg.stagnation_limit, base.stagnation_limit);
}

#[test]
fn test_mode_override_replaces_the_preset_mode() {
    let overrides = AnnealOverrides {
        mode: Some(ScoringMode::Strict),
        ..Default::default()
    };
    assert_eq!(
        Preset::TranspositionLane.config().mode,
        ScoringMode::Tolerant
    );
    let cfg = overrides.resolve(Preset::TranspositionLane).unwrap();
    assert_eq!(cfg.mode, ScoringMode::Strict);
}

#[test]
fn test_profile_reads_mode_and_letter_rate() {
    let file = temp_file(
        r#"{ "mode": "tolerant", "mutation": { "letters_only_rate": 0.5 } }"#,
    );
    let cfg = AnnealConfig::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.mode, ScoringMode::Tolerant);
    assert_eq!(cfg.mutation.letters_only_rate, 0.5);
    assert_eq!(cfg.mutation.swap_weight, 1.0);
}

#[test]
fn test_no_stagnation_wins_over_a_limit() {
    let overrides = AnnealOverrides {
        stagnation_limit: Some(10),
        no_stagnation: true,
        ..Default::default()
    };
    let mut cfg = Preset::TranspositionLane.config();
    overrides.apply(&mut cfg);
    assert_eq!(cfg.stagnation_limit, None);
}

#[test]
fn test_invalid_override_fails_resolution() {
    let overrides = AnnealOverrides {
        cooling_rate: Some(0.0),
        ..Default::default()
    };
    assert!(overrides.resolve(Preset::Joint).is_err());
}

#[test]
fn test_profile_file_replaces_the_preset() {
    let file = temp_file(r#"{ "max_iterations": 7, "initial_temperature": 3.5 }"#);
    let overrides = AnnealOverrides {
        profile: Some(file.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    let cfg = overrides.resolve(Preset::SquareRefine).unwrap();
    assert_eq!(cfg.max_iterations, 7);
    assert_eq!(cfg.initial_temperature, 3.5);
    assert_eq!(cfg.stagnation_limit, AnnealConfig::default().stagnation_limit);
}
