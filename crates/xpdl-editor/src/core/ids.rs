//! Identifier allocation
//!
//! New entities receive `max(id) + 1` as their local id. Kinds that also carry
//! an external `xpdlId` of the form `<prefix>-<id>` keep advancing the
//! candidate until that string is free too, because users can rename external
//! ids out of numeric order. Allocation fails once the candidate would pass
//! `EntityId::MAX`.

use crate::core::entity::Identified;
use crate::core::error::{EditorError, EditorResult};
use crate::core::types::EntityId;

/// Largest id in the list, or 0 when empty
pub fn max_id<T: Identified>(list: &[T]) -> EntityId {
    list.iter().map(Identified::id).max().unwrap_or(0)
}

fn successor(id: EntityId) -> EditorResult<EntityId> {
    id.checked_add(1)
        .ok_or(EditorError::IdentifiersExhausted { max: id })
}

/// Next free local id for a list
pub fn next_id<T: Identified>(list: &[T]) -> EditorResult<EntityId> {
    successor(max_id(list))
}

/// Format an external id from its prefix and numeric part
pub fn format_xpdl_id(prefix: &str, id: EntityId) -> String {
    format!("{prefix}-{id}")
}

/// Next `(id, xpdlId)` pair that collides with nothing in the list
///
/// Only entities reporting an external id take part in the collision check,
/// so a mixed node list checks activity ids alone.
pub fn next_id_with_xpdl<T: Identified>(
    list: &[T],
    prefix: &str,
) -> EditorResult<(EntityId, String)> {
    let mut id = max_id(list);
    loop {
        id = successor(id)?;
        let xpdl_id = format_xpdl_id(prefix, id);
        if !list.iter().any(|it| it.xpdl_id() == Some(xpdl_id.as_str())) {
            return Ok((id, xpdl_id));
        }
    }
}
