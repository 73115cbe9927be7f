//! Rotation angle to winning option
//!
//! The pointer is fixed at 12 o'clock and the wheel turns clockwise beneath
//! it, so after a rotation of `r` degrees the pointer sits over the wheel
//! angle `360 - (r mod 360)`. Counting sectors from the rotation instead
//! walks the option list backwards: the winner is `n - 1 - sector`.

use super::option::WheelOption;
use crate::normalize_degrees;

/// Index of the option under the pointer after `rotation_degrees`
///
/// Returns `None` only when there are no options.
pub fn resolve_index(rotation_degrees: f64, option_count: usize) -> Option<usize> {
    if option_count == 0 {
        return None;
    }
    let per_option = 360.0 / option_count as f64;
    let normalized = normalize_degrees(rotation_degrees);
    // Clamp: rounding can land exactly on 360
    let sector = ((normalized / per_option).floor() as usize).min(option_count - 1);
    Some(option_count - 1 - sector)
}

/// Option under the pointer after `rotation_degrees`
pub fn resolve(rotation_degrees: f64, options: &[WheelOption]) -> Option<&WheelOption> {
    resolve_index(rotation_degrees, options.len()).map(|i| &options[i])
}
