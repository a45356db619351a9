//! Configuration parsing tests (JSON and YAML).

use approx::assert_relative_eq;
use ect_core::prelude::*;
use ect_core::{BoundSide, GainLimitConfig};

fn must<T, E: std::fmt::Debug>(r: Result<T, E>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("must() failed: {e:?}"),
    }
}

#[test]
fn json_minimal_config_uses_identity_transforms() {
    let json = r#"{
        "contraction": { "kind": "linear", "alpha": 0.8 },
        "gain_limit": { "kind": "linear", "gain": 0.5, "u_min": -100.0, "u_max": 100.0 }
    }"#;
    let config: ControllerConfig = must(serde_json::from_str(json));
    let c = must(config.build());

    assert_relative_eq!(c.update(45.0), 18.0, epsilon = 1e-12);
    assert_eq!(c.gain_limit().policy(), NonFinitePolicy::LowerBound);
    assert_eq!(c.bounds().min(), -100.0);
}

#[test]
fn json_explicit_policy_and_transforms() {
    let json = r#"{
        "forward": { "kind": "identity" },
        "contraction": { "kind": "linear", "alpha": 0.8 },
        "inverse": { "kind": "identity" },
        "gain_limit": {
            "kind": "linear", "gain": 1.0, "u_min": -2.0, "u_max": 2.0,
            "non_finite": "upper_bound"
        }
    }"#;
    let config: ControllerConfig = must(serde_json::from_str(json));
    let c = must(config.build());
    assert_eq!(c.update(f64::NAN), 2.0);
}

#[test]
fn json_unknown_field_is_rejected() {
    let json = r#"{
        "contraction": { "kind": "linear", "alpha": 0.8 },
        "gain_limit": { "kind": "linear", "gain": 1.0, "u_min": -1.0, "u_max": 1.0 },
        "sample_rate": 1000
    }"#;
    assert!(serde_json::from_str::<ControllerConfig>(json).is_err());
}

#[test]
fn json_unknown_stage_kind_is_rejected() {
    let json = r#"{
        "contraction": { "kind": "quadratic", "alpha": 0.8 },
        "gain_limit": { "kind": "linear", "gain": 1.0, "u_min": -1.0, "u_max": 1.0 }
    }"#;
    assert!(serde_json::from_str::<ControllerConfig>(json).is_err());
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ControllerConfig::linear(0.8, 0.3, -100.0, 100.0);
    let json = must(serde_json::to_string(&config));
    let parsed: ControllerConfig = must(serde_json::from_str(&json));
    assert_eq!(parsed, config);
}

#[test]
fn yaml_infinite_bounds_are_unbounded() {
    let yaml = "
contraction:
  kind: linear
  alpha: 0.8
gain_limit:
  kind: linear
  gain: 1.0
  u_min: -.inf
  u_max: .inf
";
    let config: ControllerConfig = must(serde_yaml::from_str(yaml));
    let c = must(config.build());
    assert_eq!(c.bounds(), Bounds::UNBOUNDED);
    assert_relative_eq!(c.update(1e12), 8e11, max_relative = 1e-12);
}

#[test]
fn yaml_invalid_values_fail_at_build() {
    let yaml = "
contraction:
  kind: linear
  alpha: .nan
gain_limit:
  kind: linear
  gain: 1.0
  u_min: -1.0
  u_max: 1.0
";
    let config: ControllerConfig = must(serde_yaml::from_str(yaml));
    assert!(matches!(
        config.build(),
        Err(ConfigError::NonFiniteGain {
            stage: Stage::Contraction,
            ..
        })
    ));

    let config = ControllerConfig {
        gain_limit: GainLimitConfig::Linear {
            gain: 1.0,
            u_min: -1.0,
            u_max: f64::NAN,
            non_finite: NonFinitePolicy::LowerBound,
        },
        ..ControllerConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NanBound {
            side: BoundSide::Upper
        })
    );
}

#[test]
fn ect_error_wraps_both_categories() {
    let config: EctError = ConfigError::InvertedBounds {
        u_min: 1.0,
        u_max: 0.0,
    }
    .into();
    assert_eq!(config.category(), ect_core::ErrorCategory::Config);

    let numeric: EctError = NumericError::NonFinite {
        stage: Stage::GainLimit,
        value: f64::INFINITY,
    }
    .into();
    assert_eq!(numeric.category(), ect_core::ErrorCategory::Numeric);
}
