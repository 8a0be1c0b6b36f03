//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Clamp a f64 to the f32 range and downcast, returning 0.0 for non-finite values.
#[must_use]
pub fn clamp_f64_to_f32(value: f64) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let min = cast::<f32, f64>(f32::MIN).unwrap_or(f64::MIN);
    let max = cast::<f32, f64>(f32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max);
    cast::<f64, f32>(clamped).unwrap_or(0.0)
}

/// Round a f32 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f32_to_i32(value: f32) -> i32 {
    let value = f64::from(value);
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}
