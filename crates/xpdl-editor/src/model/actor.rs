//! Actor directory
//!
//! Actors of the selected process plus the actor currently picked in the
//! side list. New activities are assigned to the picked actor.

use tracing::{debug, trace};

use crate::core::factory::create_actor;
use crate::core::{Actor, EditorError, EditorResult, EntityId, Identified};
use crate::model::NodeStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorDirectory {
    actors: Vec<Actor>,
    selected: Option<EntityId>,
}

impl ActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every actor and pick the first one
    pub fn load(&mut self, actors: &[Actor]) {
        self.actors = actors.to_vec();
        self.selected = self.actors.first().map(|actor| actor.id);
        debug!(actor_count = self.actors.len(), "Actors loaded");
    }

    /// Detached copy of every actor
    pub fn save(&self) -> Vec<Actor> {
        self.actors.clone()
    }

    pub fn as_slice(&self) -> &[Actor] {
        &self.actors
    }

    pub fn get(&self, id: EntityId) -> EditorResult<&Actor> {
        self.actors
            .iter()
            .find(|actor| actor.id == id)
            .ok_or_else(|| EditorError::not_found("actor", id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The actor picked in the side list
    pub fn selected_actor(&self) -> Option<&Actor> {
        self.selected.and_then(|id| self.get(id).ok())
    }

    /// Pick an actor
    pub fn select_actor(&mut self, id: EntityId) -> EditorResult<()> {
        self.get(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Append a default actor and pick it
    pub fn add_actor(&mut self) -> EditorResult<Actor> {
        let actor = create_actor(&self.actors)?;
        trace!(actor_id = actor.id, xpdl_id = %actor.xpdl_id, "Adding actor");
        self.selected = Some(actor.id);
        self.actors.push(actor.clone());
        Ok(actor)
    }

    /// Replace an actor's external id and name
    pub fn update_actor(&mut self, patch: &Actor) -> EditorResult<()> {
        if self
            .actors
            .iter()
            .any(|actor| actor.id != patch.id && actor.xpdl_id == patch.xpdl_id)
        {
            return Err(EditorError::duplicate("actors", patch.xpdl_id.clone()));
        }
        let actor = self
            .actors
            .iter_mut()
            .find(|actor| actor.id == patch.id)
            .ok_or_else(|| EditorError::not_found("actor", patch.id))?;
        *actor = patch.clone();
        trace!(actor_id = patch.id, "Actor updated");
        Ok(())
    }

    /// Remove an actor no activity refers to
    ///
    /// The last actor of a process cannot be removed. When the picked actor
    /// goes, the pick moves to the actor that took its place in the list.
    pub fn remove_actor(&mut self, id: EntityId, nodes: &NodeStore) -> EditorResult<Actor> {
        let pos = self
            .actors
            .iter()
            .position(|actor| actor.id == id)
            .ok_or_else(|| EditorError::not_found("actor", id))?;
        let referrers = nodes
            .activity_nodes()
            .filter(|activity| activity.actor_id == id)
            .count();
        if referrers > 0 {
            return Err(EditorError::in_use("actor", id, referrers));
        }
        if self.actors.len() <= 1 {
            return Err(EditorError::LastRemaining { entity: "actor" });
        }

        let removed = self.actors.remove(pos);
        if self.selected == Some(id) {
            let next = pos.min(self.actors.len() - 1);
            self.selected = Some(self.actors[next].id());
        }
        debug!(actor_id = id, actor_count = self.actors.len(), "Actor removed");
        Ok(removed)
    }
}
