/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a length or count to `f64`.
///
/// Lengths beyond `MAX_SAFE_U64_INT` cannot occur for in-memory arrays and
/// strings, so the value saturates there instead of failing.
///
/// ## Example
/// ```
/// use quill::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(3), 3.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    let value = u64::try_from(value).unwrap_or(u64::MAX).min(MAX_SAFE_U64_INT);
    value as f64
}

/// Converts an `f64` to an index if it is finite, non-negative, integral and
/// within range.
///
/// # Parameters
/// - `value`: The floating-point value to convert.
///
/// # Returns
/// - `Some(usize)`: The index if the conversion is exact.
/// - `None`: For negative, fractional, non-finite or oversized values.
///
/// # Example
/// ```
/// use quill::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.0), Some(2));
/// assert_eq!(f64_to_index(1.5), None);
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    if value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    usize::try_from(value as u64).ok()
}

/// Formats a number the way scripts see it.
///
/// Integral values print without a fraction, `-0` prints as `0`, and the
/// non-finite values print as `Infinity`, `-Infinity` and `NaN`.
///
/// # Example
/// ```
/// use quill::util::num::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1.0 / 0.0), "Infinity");
/// assert_eq!(format_number(-1.0 / 0.0), "-Infinity");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
