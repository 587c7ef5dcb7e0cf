//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Round a f32 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f32_to_i64(value: f32) -> i64 {
    round_f64_to_i64(f64::from(value))
}

/// Round a f32 and clamp it to the u32 range, returning 0 for NaN or negative values.
#[must_use]
pub fn round_f32_to_u32(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f32>(u32::MAX).unwrap_or(f32::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f32, u32>(clamped).unwrap_or(0)
}

/// Ceil a f32 and clamp it to the u32 range, returning 0 for non-finite or
/// negative values.
#[must_use]
pub fn ceil_f32_to_u32(value: f32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f32>(u32::MAX).unwrap_or(f32::MAX);
    let clamped = value.clamp(0.0, max).ceil();
    cast::<f32, u32>(clamped).unwrap_or(0)
}

/// Convert i64 to f32 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f32(value: i64) -> f32 {
    cast::<i64, f32>(value).unwrap_or(0.0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}
