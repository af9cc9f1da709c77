//! Fallible construction.
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds |
//! | [`TryNew`] | Construction validates its input |
//! | `TryFrom<T>` | Converting from another type |
//!
//! # Example
//!
//! ```
//! use hostkit_types::TryNew;
//!
//! #[derive(Debug)]
//! struct Threshold(i64);
//!
//! #[derive(Debug, PartialEq)]
//! struct NegativeThreshold;
//!
//! impl TryNew for Threshold {
//!     type Error = NegativeThreshold;
//!     type Args = i64;
//!
//!     fn try_new(cents: i64) -> Result<Self, Self::Error> {
//!         if cents < 0 {
//!             return Err(NegativeThreshold);
//!         }
//!         Ok(Threshold(cents))
//!     }
//! }
//!
//! assert!(Threshold::try_new(100).is_ok());
//! assert_eq!(Threshold::try_new(-1).unwrap_err(), NegativeThreshold);
//! ```

/// Trait for fallible construction with validation.
///
/// Types implementing `TryNew` should not also offer a plain `new()` that
/// performs the same validation; the `try_` prefix keeps fallibility visible
/// at the call site.
pub trait TryNew: Sized {
    /// Error returned when validation fails.
    type Error;

    /// Arguments required for construction (a tuple for several values).
    type Args;

    /// Validates `args` and constructs the value.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when `args` do not satisfy the type's invariants.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>;
}
