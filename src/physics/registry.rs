//! Collider registry with generation-checked handles
//!
//! Removing a collider leaves a tombstone; no other id is renumbered. Freed
//! slots are recycled, and the slot's generation is bumped so ids handed out
//! before the removal can no longer reach the new occupant.

use std::collections::VecDeque;

use glam::Vec3;

use super::collider::{ColliderShape, CollisionPrimitive};

/// Handle to a registered collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId {
    pub index: u32,
    pub generation: u32,
}

impl std::fmt::Display for ColliderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "collider#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Collider {index} (generation {generation}) is no longer registered")]
    StaleCollider { index: u32, generation: u32 },
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    primitive: Option<CollisionPrimitive>,
}

/// Owns every collider of a level
#[derive(Debug, Clone, Default)]
pub struct ColliderRegistry {
    slots: Vec<Slot>,
    free: VecDeque<u32>,
    live: usize,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: VecDeque::new(),
            live: 0,
        }
    }

    /// Register a collider
    pub fn add(&mut self, primitive: CollisionPrimitive) -> ColliderId {
        self.live += 1;

        if let Some(index) = self.free.pop_front() {
            let slot = &mut self.slots[index as usize];
            slot.primitive = Some(primitive);
            return ColliderId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            primitive: Some(primitive),
        });
        ColliderId { index, generation: 0 }
    }

    /// Register every static collider, returning their ids in order
    pub fn extend_static(&mut self, primitives: impl IntoIterator<Item = CollisionPrimitive>) -> Vec<ColliderId> {
        primitives.into_iter().map(|p| self.add(p)).collect()
    }

    fn slot(&self, id: ColliderId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ColliderId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    /// Unregister a collider; `None` if the id is stale
    pub fn remove(&mut self, id: ColliderId) -> Option<CollisionPrimitive> {
        let slot = self.slot_mut(id)?;
        let primitive = slot.primitive.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push_back(id.index);
        self.live -= 1;
        Some(primitive)
    }

    /// Replace a collider in place
    pub fn update(&mut self, id: ColliderId, primitive: CollisionPrimitive) -> Result<(), RegistryError> {
        match self.slot_mut(id) {
            Some(Slot { primitive: Some(current), .. }) => {
                *current = primitive;
                Ok(())
            }
            _ => Err(RegistryError::StaleCollider {
                index: id.index,
                generation: id.generation,
            }),
        }
    }

    /// Move a cylinder collider, keeping its size and tags.
    ///
    /// Box colliders are left untouched and still report success.
    pub fn update_cylinder_center(&mut self, id: ColliderId, position: Vec3) -> Result<(), RegistryError> {
        match self.slot_mut(id) {
            Some(Slot { primitive: Some(current), .. }) => {
                if let ColliderShape::Cylinder { center, .. } = &mut current.shape {
                    *center = position;
                }
                Ok(())
            }
            _ => Err(RegistryError::StaleCollider {
                index: id.index,
                generation: id.generation,
            }),
        }
    }

    pub fn get(&self, id: ColliderId) -> Option<&CollisionPrimitive> {
        self.slot(id)?.primitive.as_ref()
    }

    /// Live colliders
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live colliders in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &CollisionPrimitive)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.primitive.as_ref().map(|p| {
                (
                    ColliderId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    p,
                )
            })
        })
    }

    /// Drop every collider. Outstanding ids all become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.primitive.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push_back(index as u32);
        }
        self.live = 0;
        log::debug!("[ColliderRegistry] Cleared, {} slots free", self.free.len());
    }
}
