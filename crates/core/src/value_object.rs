//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Box dimensions and paper specs are values: two templates that share the
/// same 30 × 20 × 15 cm dimensions hold equal `BoxDimensions`, even though the
/// templates themselves are different records. To change a value object,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct BoxDimensions { length_cm: f64, breadth_cm: f64, height_cm: f64 }
///
/// impl ValueObject for BoxDimensions {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
