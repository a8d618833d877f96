//! 2D vector used for positions, sizes and velocities
//!
//! Positions are in tile units: x grows to the right, y grows downward
//! (row index). Vectors are plain `Copy` values, so `a + b` and `a * k`
//! always produce a new vector and leave the operands untouched.

use glam::Vec2;

use crate::error::{Result, SimError};

/// Point or displacement in tile space
pub type Vector = Vec2;

/// Reject vectors that cannot take part in grid arithmetic
#[inline]
pub fn ensure_finite(v: Vector, what: &'static str) -> Result<Vector> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SimError::TypeKind { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plus_and_times_return_new_values() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -4.0);

        assert_eq!(a + b, Vector::new(4.0, -2.0));
        assert_eq!(a * 3.0, Vector::new(3.0, 6.0));
        assert_eq!(b * -1.0, Vector::new(-3.0, 4.0));
        // Operands unchanged
        assert_eq!(a, Vector::new(1.0, 2.0));
        assert_eq!(b, Vector::new(3.0, -4.0));
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(Vector::new(-1.5, 1e6), "pos").is_ok());
        assert!(matches!(
            ensure_finite(Vector::new(f32::NAN, 0.0), "pos"),
            Err(SimError::TypeKind { what: "pos" })
        ));
        assert!(ensure_finite(Vector::new(0.0, f32::INFINITY), "size").is_err());
    }

    proptest! {
        #[test]
        fn prop_additive_inverse(
            x in -1000i32..1000,
            y in -1000i32..1000,
            a in -1000i32..1000,
            b in -1000i32..1000,
        ) {
            // Integer-valued components keep f32 sums exact
            let v = Vector::new(x as f32, y as f32);
            let d = Vector::new(a as f32, b as f32);
            prop_assert_eq!(v + d + Vector::new(-d.x, -d.y), v);
        }
    }
}
