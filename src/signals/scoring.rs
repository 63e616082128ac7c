//! Score scale transforms.
//!
//! Sector scores are stored in their native [-1, +1] range. The 0-100
//! display value is derived on demand and never stored alongside.

/// Map a native score in [-1, +1] to the 0-100 display scale.
pub fn to_display(raw: f64) -> f64 {
    ((raw.clamp(-1.0, 1.0) + 1.0) / 2.0) * 100.0
}

/// Inverse of [`to_display`].
pub fn from_display(display: f64) -> f64 {
    display / 50.0 - 1.0
}

/// Round to one decimal place, the precision weights are kept at.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
