//! Core Entity Trait
//!
//! Everything the store keeps in an ordered list is addressed by a stable id.

/// Core trait for records held by id
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}
