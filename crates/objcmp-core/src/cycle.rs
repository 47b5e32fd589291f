//! Reference-cycle guard for one top-level comparison

use std::any::TypeId;
use std::collections::HashSet;

use crate::inspect::Inspect;

/// Reference identity of a composite: its address plus its concrete type
///
/// The type is part of the token because a record and its first field can
/// share an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_id: TypeId,
}

impl Identity {
    pub fn of(value: &dyn Inspect) -> Self {
        Self {
            addr: value as *const dyn Inspect as *const () as usize,
            type_id: value.type_info().id(),
        }
    }
}

/// Visited set of composites entered during one call
///
/// Grows monotonically; nothing is removed when a branch finishes, so a
/// composite reached a second time through another path is not re-verified.
#[derive(Debug, Default)]
pub struct CycleGuard {
    visited: HashSet<Identity>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identity`; returns `false` if it was already visited
    pub fn enter(&mut self, identity: Identity) -> bool {
        self.visited.insert(identity)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.visited.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
