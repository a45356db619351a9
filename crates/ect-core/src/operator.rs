//! Operator capabilities
//!
//! One trait per pipeline role. Each exposes a single pure mapping
//! `apply(x) -> y`: same input and configuration give the same output, with
//! no ordering dependency between calls and no interior mutation.
//!
//! Every trait is implemented for `&T`, `Box<T>` and `Arc<T>`, so a
//! [`Controller`](crate::Controller) can own its stages, borrow them, or share
//! them with other controllers.
//!
//! # RT Safety
//!
//! Implementations must not allocate, block, or perform I/O in `apply`, and
//! must run in bounded time.

use std::sync::Arc;

use crate::error::{NumericError, Stage};
use crate::saturation::Bounds;

/// Forward transform: maps the error signal into the contraction domain.
///
/// Must be total over all finite inputs.
pub trait ForwardTransform {
    /// Map `delta` into the contraction domain.
    fn apply(&self, delta: f64) -> f64;
}

/// Contraction: shrinks its input toward zero.
pub trait Contraction {
    /// Contract `x`.
    fn apply(&self, x: f64) -> f64;
}

/// Inverse transform: maps back out of the contraction domain.
///
/// Must be total over all finite inputs.
pub trait InverseTransform {
    /// Map `x` back into the error domain.
    fn apply(&self, x: f64) -> f64;
}

/// Gain-and-limit: scales its input and saturates it to actuator bounds.
///
/// `apply` must always return a value inside [`GainLimit::bounds`], including
/// for NaN input.
pub trait GainLimit {
    /// Produce the bounded actuator command.
    fn apply(&self, x: f64) -> f64;

    /// Actuator bounds of this stage.
    fn bounds(&self) -> Bounds;

    /// Strict variant of [`GainLimit::apply`].
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NonFinite`] if `x` is NaN or infinite.
    #[inline]
    fn try_apply(&self, x: f64) -> Result<f64, NumericError> {
        if !x.is_finite() {
            return Err(NumericError::NonFinite {
                stage: Stage::GainLimit,
                value: x,
            });
        }
        Ok(self.apply(x))
    }
}

macro_rules! impl_unary_operator_for_pointers {
    ($trait:ident) => {
        impl<T: $trait + ?Sized> $trait for &T {
            #[inline]
            fn apply(&self, x: f64) -> f64 {
                (**self).apply(x)
            }
        }

        impl<T: $trait + ?Sized> $trait for Box<T> {
            #[inline]
            fn apply(&self, x: f64) -> f64 {
                (**self).apply(x)
            }
        }

        impl<T: $trait + ?Sized> $trait for Arc<T> {
            #[inline]
            fn apply(&self, x: f64) -> f64 {
                (**self).apply(x)
            }
        }
    };
}

impl_unary_operator_for_pointers!(ForwardTransform);
impl_unary_operator_for_pointers!(Contraction);
impl_unary_operator_for_pointers!(InverseTransform);

macro_rules! impl_gain_limit_body {
    () => {
        #[inline]
        fn apply(&self, x: f64) -> f64 {
            (**self).apply(x)
        }

        #[inline]
        fn bounds(&self) -> Bounds {
            (**self).bounds()
        }

        #[inline]
        fn try_apply(&self, x: f64) -> Result<f64, NumericError> {
            (**self).try_apply(x)
        }
    };
}

impl<T: GainLimit + ?Sized> GainLimit for &T {
    impl_gain_limit_body!();
}

impl<T: GainLimit + ?Sized> GainLimit for Box<T> {
    impl_gain_limit_body!();
}

impl<T: GainLimit + ?Sized> GainLimit for Arc<T> {
    impl_gain_limit_body!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saturation::{NonFinitePolicy, saturate};

    struct Doubling;

    impl Contraction for Doubling {
        fn apply(&self, x: f64) -> f64 {
            0.5 * x
        }
    }

    struct UnitLimit;

    impl GainLimit for UnitLimit {
        fn apply(&self, x: f64) -> f64 {
            saturate(x, self.bounds(), NonFinitePolicy::LowerBound)
        }

        fn bounds(&self) -> Bounds {
            match Bounds::new(-1.0, 1.0) {
                Ok(b) => b,
                Err(e) => panic!("unit bounds rejected: {e}"),
            }
        }
    }

    #[test]
    fn test_pointer_impls_delegate() {
        let owned = Doubling;
        let boxed: Box<dyn Contraction> = Box::new(Doubling);
        let shared: Arc<dyn Contraction> = Arc::new(Doubling);

        assert_eq!(Contraction::apply(&&owned, 4.0), 2.0);
        assert_eq!(boxed.apply(4.0), 2.0);
        assert_eq!(shared.apply(4.0), 2.0);
    }

    #[test]
    fn test_try_apply_default_rejects_non_finite() {
        let limit = UnitLimit;
        assert_eq!(limit.try_apply(0.5), Ok(0.5));
        assert_eq!(limit.try_apply(3.0), Ok(1.0));

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = limit.try_apply(bad);
            assert!(matches!(
                err,
                Err(NumericError::NonFinite {
                    stage: Stage::GainLimit,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_gain_limit_through_arc_dyn() {
        let shared: Arc<dyn GainLimit + Send + Sync> = Arc::new(UnitLimit);
        assert_eq!(shared.apply(f64::NAN), -1.0);
        assert_eq!(shared.bounds().max(), 1.0);
        assert!(shared.try_apply(f64::NAN).is_err());
    }
}
