//! Single-event mutations on one day's entry list.
//!
//! Every mutation touches exactly one day: add appends with a fresh id,
//! edit replaces the matching entry wholesale (forcing the edited flag),
//! delete removes it. The caller recomputes the month total afterwards and
//! persists the whole map plus total in one write.

use chrono::Utc;

use crate::error::CoreError;
use crate::event::Event;
use crate::types::EntryId;

/// Pick a unique id for a new entry.
///
/// Ids are Unix-epoch milliseconds at creation time (matching the ids the
/// original client assigned), bumped past any collision with an existing
/// entry so two rapid additions on the same day cannot collide.
pub fn next_entry_id(existing: &[Event]) -> EntryId {
    unique_entry_id(Utc::now().timestamp_millis(), existing)
}

fn unique_entry_id(candidate: EntryId, existing: &[Event]) -> EntryId {
    let mut id = candidate;
    while existing.iter().any(|e| e.id == id) {
        id += 1;
    }
    id
}

/// Append a new entry, assigning it a fresh unique id. Returns the id.
pub fn add_entry(day: &mut Vec<Event>, mut event: Event) -> EntryId {
    event.id = next_entry_id(day);
    event.is_edited = false;
    let id = event.id;
    day.push(event);
    id
}

/// Replace the entry with the given id wholesale, keeping the id stable
/// and forcing `is_edited`.
pub fn edit_entry(day: &mut [Event], id: EntryId, mut replacement: Event) -> Result<(), CoreError> {
    let slot = day
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(CoreError::NotFound { entity: "Entry", id })?;

    replacement.id = id;
    replacement.is_edited = true;
    *slot = replacement;
    Ok(())
}

/// Remove the entry with the given id.
pub fn delete_entry(day: &mut Vec<Event>, id: EntryId) -> Result<(), CoreError> {
    let before = day.len();
    day.retain(|e| e.id != id);
    if day.len() == before {
        return Err(CoreError::NotFound { entity: "Entry", id });
    }
    Ok(())
}
