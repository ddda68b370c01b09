//! Fixed-capacity session arena.

use quill_proto::CaseMapping;

use super::session::{Outbound, Session, SessionId};

#[derive(Debug)]
enum Slot {
    Free { generation: u32 },
    Occupied(Session),
}

/// All live sessions, addressed by [`SessionId`].
///
/// Slots are reused lowest index first; the table only grows when every
/// existing slot is occupied, and never past its capacity. Iteration follows
/// slot order.
#[derive(Debug)]
pub struct SessionTable {
    slots: Vec<Slot>,
    capacity: usize,
    live: usize,
}

impl SessionTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            live: 0,
        }
    }

    /// Create a session in the first free slot.
    ///
    /// Returns `None` when the table is full.
    pub fn insert(&mut self, outbound: Outbound) -> Option<SessionId> {
        let free = self
            .slots
            .iter()
            .enumerate()
            .find_map(|(index, slot)| match slot {
                Slot::Free { generation } => Some((index, *generation)),
                Slot::Occupied(_) => None,
            });

        let id = match free {
            Some((index, generation)) => SessionId::new(index, generation),
            None if self.slots.len() < self.capacity => {
                self.slots.push(Slot::Free { generation: 0 });
                SessionId::new(self.slots.len() - 1, 0)
            }
            None => return None,
        };

        self.slots[id.index()] = Slot::Occupied(Session::new(id, outbound));
        self.live += 1;
        Some(id)
    }

    /// Free a session's slot. Stale handles are ignored.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.get(id)?;
        let next = Slot::Free {
            generation: id.generation().wrapping_add(1),
        };
        match std::mem::replace(&mut self.slots[id.index()], next) {
            Slot::Occupied(session) => {
                self.live -= 1;
                Some(session)
            }
            Slot::Free { .. } => None,
        }
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(s)) if s.id() == id => Some(s),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(s)) if s.id() == id => Some(s),
            _ => None,
        }
    }

    /// Live sessions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(s) => Some(s),
            Slot::Free { .. } => None,
        })
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Find a session other than `except` that owns `nick`.
    ///
    /// Only sessions past the NICK step own their nickname.
    pub fn nick_owner(
        &self,
        nick: &str,
        except: SessionId,
        casemap: CaseMapping,
    ) -> Option<SessionId> {
        self.iter()
            .filter(|s| s.id() != except && s.state.holds_nick())
            .find(|s| s.nick.as_deref().is_some_and(|n| casemap.eq(n, nick)))
            .map(Session::id)
    }
}
