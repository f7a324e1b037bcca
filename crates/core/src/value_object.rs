//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values.
/// A price snapshot on an order line is the canonical example here: two lines
/// with the same amount hold equal prices even if they point at different
/// products.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
