//! Storage for every control in the editor, keyed by id.

use std::collections::BTreeMap;

use nf_core::{ControlId, NodeId};

use crate::control::Control;
use crate::host::ControlStore;

/// A control together with where it is attached.
#[derive(Debug, Clone)]
pub struct ArenaEntry {
    pub owner: NodeId,
    pub name: String,
    pub control: Control,
}

/// Arena of controls.
///
/// The arena does not allocate: ids come from the owner's allocator, which
/// never reuses them, so a stale id held by a renderer or handler simply
/// stops resolving once its control is removed.
#[derive(Debug, Default, Clone)]
pub struct ControlArena {
    entries: BTreeMap<ControlId, ArenaEntry>,
}

impl ControlArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a control owned by `owner` under `name`. Returns the entry that
    /// previously held `id`, if any.
    pub fn insert(
        &mut self,
        id: ControlId,
        owner: NodeId,
        name: impl Into<String>,
        control: Control,
    ) -> Option<ArenaEntry> {
        self.entries.insert(
            id,
            ArenaEntry {
                owner,
                name: name.into(),
                control,
            },
        )
    }

    pub fn remove(&mut self, id: ControlId) -> Option<ArenaEntry> {
        self.entries.remove(&id)
    }

    /// Remove every control owned by `owner`, returning the removed ids.
    pub fn remove_owned_by(&mut self, owner: NodeId) -> Vec<ControlId> {
        let ids: Vec<ControlId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.entries.remove(id);
        }
        ids
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.entries.get(&id).map(|entry| &entry.control)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.entries.get_mut(&id).map(|entry| &mut entry.control)
    }

    pub fn entry(&self, id: ControlId) -> Option<&ArenaEntry> {
        self.entries.get(&id)
    }

    pub fn owner(&self, id: ControlId) -> Option<NodeId> {
        self.entries.get(&id).map(|entry| entry.owner)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &ArenaEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ControlStore for ControlArena {
    fn control(&self, id: ControlId) -> Option<&Control> {
        self.get(id)
    }
}
