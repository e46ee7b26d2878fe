//! Stack safety for deep recursion.
//!
//! The parser and evaluator recurse once per nesting level of the source.
//! Wrapping those recursive entry points in [`ensure_sufficient_stack`] grows
//! the stack on demand, so deeply nested expressions are bounded by memory
//! rather than the thread's initial stack size.
//!
//! - **Red zone**: 100 KiB. If less than this remains, the stack grows.
//! - **Growth size**: 1 MiB per growth.

/// Minimum stack space to keep available.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if less than the red zone remains.
///
/// # Example
/// ```
/// use quill::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call through directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
