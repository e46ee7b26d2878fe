/// Numeric conversion helpers.
///
/// Safe conversions between `f64` and `usize` for indexing and lengths, and
/// the canonical display form of numbers.
pub mod num;
/// Stack growth for deeply nested parsing and evaluation.
pub mod stack;
