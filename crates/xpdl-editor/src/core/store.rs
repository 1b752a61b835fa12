//! Core store trait for live diagram entities
//!
//! This trait defines the interface shared by the node and edge stores: the
//! live, editable copy of one process's diagram.

use crate::core::entity::Identified;
use crate::core::error::EditorResult;
use crate::core::types::EntityId;

/// Core trait for live entity stores
///
/// A store holds the entities of the selected process only. `load` replaces
/// its contents wholesale on a process switch and `save` hands back a
/// detached copy for the process record.
pub trait Store {
    /// The entity type held by this store
    type Item: Identified + Clone;

    /// Replace every entity with `items`, preserving their order
    fn load(&mut self, items: &[Self::Item]);

    /// Detached copy of every entity in order
    fn save(&self) -> Vec<Self::Item>;

    /// Get an entity by id
    fn get(&self, id: EntityId) -> EditorResult<&Self::Item>;

    /// Apply `update` to every entity matching `predicate`
    ///
    /// Returns the number of entities updated. Lookups by id stay valid when
    /// `update` changes an entity's id.
    fn update_where<P, U>(&mut self, predicate: P, update: U) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
        U: FnMut(&mut Self::Item);

    /// Iterate over all entities in order
    fn iter(&self) -> impl Iterator<Item = &Self::Item>;

    /// Check if an entity exists
    fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_ok()
    }

    /// Get the number of entities
    fn len(&self) -> usize;

    /// Returns true if the store holds nothing
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
