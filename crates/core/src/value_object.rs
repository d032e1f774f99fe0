//! Value object trait: equality by value, not identity.
//!
//! Value objects carry no identity of their own: two schedule windows with the
//! same start and end dates are the same window, and two uploaded images with
//! the same key are the same image.

/// Marker trait for value objects.
///
/// Implementors are immutable once built and compared by their attribute
/// values. To "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct DateWindow { start: NaiveDate, end: NaiveDate }
///
/// impl ValueObject for DateWindow {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
