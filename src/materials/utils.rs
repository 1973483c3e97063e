//! Helper functions for materials

use crate::math::Real;

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: Real) -> Real {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Check if a volume ratio still describes physical matter
#[inline]
pub fn volume_ratio_ok(j: Real) -> bool {
    j > 0.0 && j.is_finite()
}
