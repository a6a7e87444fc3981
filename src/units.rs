// Unit conversion, rounding and clamping for snapshot figures

/// Bytes per gigabyte (binary, 1024³).
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bytes per megabyte (binary, 1024²).
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Round to two decimal places. Non-finite input becomes 0.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Floor negative or NaN sizes to 0.
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

/// Clamp a percentage to [0, 100]; NaN maps to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// used / total × 100, rounded to 2dp and clamped. A zero total yields 0.
pub fn utilization_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    clamp_percent(round2(used as f64 / total as f64 * 100.0))
}
