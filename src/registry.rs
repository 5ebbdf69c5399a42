//! Owned registry of gravity sources.
//!
//! Sources live in generational slots.  A [`SourceId`] stays valid until the
//! source is [removed](GravitySourceRegistry::remove); after that the slot's
//! generation moves on and the old id resolves to nothing, even if the slot is
//! reused.  Activation is separate from storage: only
//! [registered](GravitySourceRegistry::register) sources take part in field
//! evaluation.
//!
//! Iteration order is slot order.  Callers sum contributions, so the order only
//! affects floating-point rounding and dominant-source tie-breaks.

use bevy::prelude::*;

use crate::source::GravitySource;

/// Generational handle to a source in a [`GravitySourceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId {
    index: u32,
    generation: u32,
}

impl SourceId {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    source: Option<GravitySource>,
    active: bool,
}

/// Collection of gravity sources, owned by the simulation world.
#[derive(Resource, Debug, Clone, Default)]
pub struct GravitySourceRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    active_count: usize,
}

impl GravitySourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a source without activating it.
    pub fn insert(&mut self, source: GravitySource) -> SourceId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.source = Some(source);
            slot.active = false;
            return SourceId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            source: Some(source),
            active: false,
        });
        SourceId {
            index,
            generation: 0,
        }
    }

    /// Store and activate a source in one call.
    pub fn spawn(&mut self, source: GravitySource) -> SourceId {
        let id = self.insert(source);
        self.register(id);
        id
    }

    fn slot(&self, id: SourceId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.source.is_some())
    }

    fn slot_mut(&mut self, id: SourceId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.source.is_some())
    }

    /// Activate a source.  Returns `true` only if it was inactive before.
    ///
    /// Already-active or stale ids are a no-op.
    pub fn register(&mut self, id: SourceId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if slot.active {
            return false;
        }
        slot.active = true;
        self.active_count += 1;
        debug!("gravity source {:?} registered", id);
        true
    }

    /// Deactivate a source.  Returns `true` only if it was active before.
    ///
    /// Inactive or stale ids are a no-op.
    pub fn unregister(&mut self, id: SourceId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.active {
            return false;
        }
        slot.active = false;
        self.active_count -= 1;
        debug!("gravity source {:?} unregistered", id);
        true
    }

    /// Destroy a source and invalidate its id.
    pub fn remove(&mut self, id: SourceId) -> Option<GravitySource> {
        let slot = self.slot_mut(id)?;
        let was_active = slot.active;
        let source = slot.source.take();
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        if was_active {
            self.active_count -= 1;
        }
        self.free.push(id.index);
        source
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.slot(id).is_some()
    }

    pub fn is_active(&self, id: SourceId) -> bool {
        self.slot(id).is_some_and(|slot| slot.active)
    }

    pub fn get(&self, id: SourceId) -> Option<&GravitySource> {
        self.slot(id).and_then(|slot| slot.source.as_ref())
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut GravitySource> {
        self.slot_mut(id).and_then(|slot| slot.source.as_mut())
    }

    /// Move a source.  Returns `false` for stale ids.
    pub fn set_position(&mut self, id: SourceId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(source) => {
                source.position = position;
                true
            }
            None => false,
        }
    }

    /// Every active source with its id, in slot order.
    pub fn all_active(&self) -> impl Iterator<Item = (SourceId, &GravitySource)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            if !slot.active {
                return None;
            }
            let source = slot.source.as_ref()?;
            Some((
                SourceId {
                    index: index as u32,
                    generation: slot.generation,
                },
                source,
            ))
        })
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Stored sources, active or not.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
