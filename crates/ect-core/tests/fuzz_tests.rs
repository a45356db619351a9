//! Fuzzing Tests for the ECT controller
//!
//! Verifies robustness against extreme and edge-case inputs including NaN,
//! infinities, subnormals and gain overflow.

use ect_core::prelude::*;

fn must<T, E: std::fmt::Debug>(r: Result<T, E>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("must() failed: {e:?}"),
    }
}

const EXTREME_INPUTS: [f64; 12] = [
    f64::NAN,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::MAX,
    f64::MIN,
    f64::MIN_POSITIVE,
    -f64::MIN_POSITIVE,
    f64::EPSILON,
    5e-324,
    -5e-324,
    0.0,
    -0.0,
];

#[test]
fn fuzz_extreme_inputs_stay_bounded() {
    let configs = [
        (0.8, 1.0, -1.0, 1.0),
        (0.8, 1.0, -1e9, 1e9),
        (1e300, 1e300, -2.0, 3.0),
        (0.0, 0.0, -0.5, 0.5),
        (-0.8, 1.0, -1.0, 1.0),
        (0.8, 1.0, 0.25, 0.25),
    ];

    for (alpha, gain, u_min, u_max) in configs {
        let c = must(LinearController::linear(alpha, gain, u_min, u_max));
        for delta in EXTREME_INPUTS {
            let u = c.update(delta);
            assert!(!u.is_nan(), "NaN command for delta={delta} config={alpha},{gain}");
            assert!(
                u >= u_min && u <= u_max,
                "u={u} outside [{u_min}, {u_max}] for delta={delta}"
            );
        }
    }
}

#[test]
fn fuzz_nan_input_follows_policy() {
    for nan in [f64::NAN, -f64::NAN] {
        let low = must(LinearController::linear(0.8, 1.0, -2.0, 2.0));
        assert_eq!(low.update(nan), -2.0);

        let (f, e, i, g) = low.into_stages();
        let high = Controller::new(f, e, i, g.with_policy(NonFinitePolicy::UpperBound));
        assert_eq!(high.update(nan), 2.0);
    }
}

#[test]
fn fuzz_infinite_input_saturates_by_sign() {
    let c = must(LinearController::linear(0.8, 1.0, -1.0, 1.0));
    assert_eq!(c.update(f64::INFINITY), 1.0);
    assert_eq!(c.update(f64::NEG_INFINITY), -1.0);

    let inverted = must(LinearController::linear(0.8, -1.0, -1.0, 1.0));
    assert_eq!(inverted.update(f64::INFINITY), -1.0);
    assert_eq!(inverted.update(f64::NEG_INFINITY), 1.0);
}

#[test]
fn fuzz_unbounded_stage_with_infinite_product() {
    // Infinite bounds let the infinite product through unchanged.
    let c = Controller::new(
        IdentityForward,
        must(LinearContraction::new(0.8)),
        IdentityInverse,
        must(LinearGainLimit::unbounded(1.0)),
    );
    assert_eq!(c.update(f64::INFINITY), f64::INFINITY);
    assert_eq!(c.update(f64::NAN), f64::NEG_INFINITY);
    assert!(c.try_update(f64::INFINITY).is_err());
}

#[test]
fn fuzz_strict_mode_rejects_all_non_finite() {
    let c = must(LinearController::linear(0.8, 1.0, -1.0, 1.0));
    for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        match c.try_update(delta) {
            Err(NumericError::NonFinite { stage, .. }) => assert_eq!(stage, Stage::Forward),
            Ok(u) => panic!("strict update accepted {delta}, returned {u}"),
        }
    }

    for delta in [f64::MAX, f64::MIN, 5e-324, 0.0] {
        assert!(c.try_update(delta).is_ok(), "strict update rejected {delta}");
    }
}

#[test]
fn fuzz_subnormal_inputs_preserve_sign() {
    let c = must(LinearController::linear(0.8, 1.0, -1.0, 1.0));
    assert!(c.update(5e-324) >= 0.0);
    assert!(c.update(-5e-324) <= 0.0);
    assert!(c.update(f64::MIN_POSITIVE) > 0.0);
}

#[test]
fn fuzz_rapid_alternation() {
    let c = must(LinearController::linear(0.8, 1.0, -1.0, 1.0));
    for i in 0..10_000 {
        let delta = if i % 2 == 0 { 1e12 } else { -1e12 };
        let u = c.update(delta);
        assert_eq!(u.abs(), 1.0);
    }
}

#[test]
fn fuzz_bad_configurations_rejected() {
    let bad = [
        (f64::NAN, 1.0, -1.0, 1.0),
        (f64::INFINITY, 1.0, -1.0, 1.0),
        (0.8, f64::NEG_INFINITY, -1.0, 1.0),
        (0.8, 1.0, 1.0, -1.0),
        (0.8, 1.0, f64::NAN, 1.0),
        (0.8, 1.0, -1.0, f64::NAN),
        (0.8, 1.0, f64::INFINITY, f64::NEG_INFINITY),
    ];
    for (alpha, gain, u_min, u_max) in bad {
        assert!(
            LinearController::linear(alpha, gain, u_min, u_max).is_err(),
            "accepted alpha={alpha} gain={gain} bounds=[{u_min}, {u_max}]"
        );
    }
}
