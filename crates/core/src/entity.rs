//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether two entities denote the same record, regardless of field values.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
