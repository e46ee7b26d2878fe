/// The runtime value type.
///
/// Defines the `Value` enum, the truthiness and numeric coercions, the two
/// equality relations and the display form of every value.
pub mod core;
/// Callable values.
///
/// User-defined closures over their defining scope, and host-provided native
/// functions.
pub mod function;
