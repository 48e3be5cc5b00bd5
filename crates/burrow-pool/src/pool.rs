//! Recycling instance pool.
//!
//! [`Pool`] owns every instance it ever built in a dense `Vec`, and keeps
//! two disjoint key sets over it: `available` (FIFO) and `in_use`. The
//! union of the two is always exactly the set of built instances.
//!
//! Instances are never destroyed. When `available` is empty, `acquire()`
//! builds a new one instead of failing, so the pool's size is the peak
//! number of simultaneously in-use instances (or the pre-warm size, if
//! larger).

use std::collections::VecDeque;

use burrow_core::{PoolError, PoolIndex};
use indexmap::IndexSet;

/// An instance that can live in a [`Pool`].
pub trait Recycle {
    /// Key type naming instances of this pool.
    type Key: PoolIndex;

    /// Build a fresh instance for `key`, in its parked (released) state.
    fn fresh(key: Self::Key) -> Self;

    /// Return the instance to its parked state.
    ///
    /// Called on release, before the instance becomes available again, so
    /// the next `acquire()` never observes state left by the previous user.
    fn recycle(&mut self);
}

/// A growable pool partitioned into available and in-use instances.
pub struct Pool<T: Recycle> {
    items: Vec<T>,
    available: VecDeque<T::Key>,
    in_use: IndexSet<T::Key>,
    prewarmed: usize,
}

impl<T: Recycle> Pool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::with_prewarmed(0)
    }

    /// Create a pool with `count` instances built up front.
    pub fn with_prewarmed(count: usize) -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(count),
            available: VecDeque::with_capacity(count),
            in_use: IndexSet::with_capacity(count),
            prewarmed: count,
        };
        for _ in 0..count {
            let key = pool.build();
            pool.available.push_back(key);
        }
        pool
    }

    fn build(&mut self) -> T::Key {
        let key = T::Key::from_index(self.items.len() as u32);
        self.items.push(T::fresh(key));
        key
    }

    /// Take an instance, building a new one if none is available.
    pub fn acquire(&mut self) -> T::Key {
        let key = match self.available.pop_front() {
            Some(key) => key,
            None => {
                let key = self.build();
                tracing::debug!(
                    index = key.index(),
                    size = self.items.len(),
                    "pool exhausted; grew by one instance"
                );
                key
            }
        };
        self.in_use.insert(key);
        key
    }

    /// Recycle an in-use instance and make it available again.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotInUse`] if the instance is already available (double
    /// release), [`PoolError::Unknown`] if `key` names no instance. The pool
    /// is unchanged on error.
    pub fn release(&mut self, key: T::Key) -> Result<(), PoolError> {
        let index = key.index();
        if index as usize >= self.items.len() {
            return Err(PoolError::Unknown {
                index,
                len: self.items.len() as u32,
            });
        }
        if !self.in_use.swap_remove(&key) {
            return Err(PoolError::NotInUse { index });
        }
        self.items[index as usize].recycle();
        self.available.push_back(key);
        Ok(())
    }

    /// Shared access to an in-use instance.
    pub fn get(&self, key: T::Key) -> Option<&T> {
        if self.in_use.contains(&key) {
            self.items.get(key.index() as usize)
        } else {
            None
        }
    }

    /// Mutable access to an in-use instance.
    ///
    /// Available instances are owned by the pool and cannot be mutated.
    pub fn get_mut(&mut self, key: T::Key) -> Option<&mut T> {
        if self.in_use.contains(&key) {
            self.items.get_mut(key.index() as usize)
        } else {
            None
        }
    }

    /// Shared access to any instance, in use or not.
    pub fn peek(&self, key: T::Key) -> Option<&T> {
        self.items.get(key.index() as usize)
    }

    /// Whether `key` is currently in use.
    pub fn is_in_use(&self, key: T::Key) -> bool {
        self.in_use.contains(&key)
    }

    /// Keys of in-use instances, in acquisition order (perturbed by releases).
    pub fn in_use_keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.in_use.iter().copied()
    }

    /// Total instances built.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the pool has never built an instance.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of instances ready to hand out without growing.
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Number of instances currently handed out.
    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Instances built on demand beyond the pre-warmed set.
    pub fn grown(&self) -> usize {
        self.items.len().saturating_sub(self.prewarmed)
    }

    /// Verify that `available` and `in_use` partition the built instances.
    ///
    /// Returns a description of the first violation found.
    pub fn check_partition(&self) -> Result<(), String> {
        let len = self.items.len();
        if self.available.len() + self.in_use.len() != len {
            return Err(format!(
                "available {} + in_use {} != built {len}",
                self.available.len(),
                self.in_use.len()
            ));
        }
        let mut seen = vec![false; len];
        for key in self.available.iter().chain(self.in_use.iter()) {
            let i = key.index() as usize;
            if i >= len {
                return Err(format!("key {key:?} past end of pool ({len})"));
            }
            if seen[i] {
                return Err(format!("key {key:?} appears in both partitions"));
            }
            seen[i] = true;
        }
        Ok(())
    }
}

impl<T: Recycle> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Recycle> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.items.len())
            .field("available", &self.available.len())
            .field("in_use", &self.in_use.len())
            .finish()
    }
}
