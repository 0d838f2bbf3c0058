//! Entity trait: identity that survives edits to the record's fields.

/// A record with identity (stock lines, for instance).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Short, stable record kind used in log fields (e.g. `"paper_reel"`).
    fn kind(&self) -> &'static str;
}
