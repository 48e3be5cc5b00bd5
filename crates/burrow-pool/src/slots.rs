//! Fixed slot registry with uniform random allocation.

use burrow_core::{SlotError, SlotId, Vec2};
use rand::Rng;

/// The fixed set of slots and which of them are free.
///
/// Slots are created once and never destroyed. `free` holds the indices
/// not bound to a token; `occupied` mirrors it per slot so a release can
/// be checked in O(1) and a double release rejected.
#[derive(Clone, Debug)]
pub struct SlotRegistry {
    positions: Vec<Vec2>,
    free: Vec<SlotId>,
    occupied: Vec<bool>,
}

impl SlotRegistry {
    /// Registry over `positions`, with every slot free.
    pub fn new(positions: Vec<Vec2>) -> Self {
        let count = positions.len();
        Self {
            free: (0..count as u32).map(SlotId).collect(),
            occupied: vec![false; count],
            positions,
        }
    }

    /// Take a free slot chosen uniformly at random.
    ///
    /// Returns `None` when every slot is occupied; callers treat that as
    /// "try again later".
    pub fn acquire_random_free<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SlotId> {
        if self.free.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.free.len());
        let slot = self.free.swap_remove(pick);
        self.occupied[slot.0 as usize] = true;
        Some(slot)
    }

    /// Return `slot` to the free set.
    ///
    /// # Errors
    ///
    /// [`SlotError::AlreadyFree`] on a double release and
    /// [`SlotError::OutOfRange`] for an index past the end. The registry is
    /// unchanged on error.
    pub fn release(&mut self, slot: SlotId) -> Result<(), SlotError> {
        let occupied = self
            .occupied
            .get_mut(slot.0 as usize)
            .ok_or(SlotError::OutOfRange {
                slot,
                count: self.positions.len() as u32,
            })?;
        if !*occupied {
            return Err(SlotError::AlreadyFree { slot });
        }
        *occupied = false;
        self.free.push(slot);
        Ok(())
    }

    /// World position of `slot`.
    pub fn position_of(&self, slot: SlotId) -> Result<Vec2, SlotError> {
        self.positions
            .get(slot.0 as usize)
            .copied()
            .ok_or(SlotError::OutOfRange {
                slot,
                count: self.positions.len() as u32,
            })
    }

    /// Whether `slot` is currently bound to a token.
    pub fn is_occupied(&self, slot: SlotId) -> bool {
        self.occupied.get(slot.0 as usize).copied().unwrap_or(false)
    }

    /// Occupied slots in index order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, &o)| o)
            .map(|(i, _)| SlotId(i as u32))
    }

    /// Total number of slots.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the registry has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of free slots.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Verify that the free set and the occupancy flags agree.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut in_free = vec![false; self.positions.len()];
        for &slot in &self.free {
            let i = slot.0 as usize;
            if i >= in_free.len() {
                return Err(format!("free slot {slot} out of range"));
            }
            if in_free[i] {
                return Err(format!("slot {slot} listed free twice"));
            }
            in_free[i] = true;
        }
        for (i, (&free, &occupied)) in in_free.iter().zip(&self.occupied).enumerate() {
            if free == occupied {
                return Err(format!(
                    "slot {i}: free-set membership {free} contradicts occupied flag {occupied}"
                ));
            }
        }
        Ok(())
    }
}
