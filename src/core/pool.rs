//! Free-list object pool
//!
//! Records handed out by [`Pool::acquire`] are exclusively owned by the
//! returned [`Pooled`] guard. Dropping the guard runs [`Recycle::reset`]
//! and puts the record back on the free list, so no caller ever observes
//! fields left over from a previous use.

use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Types that can be wiped and handed out again
pub trait Recycle: Default {
    /// Return every field to its empty state
    fn reset(&mut self);

    /// Whether a reset value is worth keeping; oversized buffers are dropped
    fn reusable(&self) -> bool {
        true
    }
}

/// Upper bound on byte buffer capacity kept in a pool (64 KiB)
const MAX_POOLED_BUFFER: usize = 64 * 1024;

impl Recycle for Vec<u8> {
    fn reset(&mut self) {
        self.clear();
    }

    fn reusable(&self) -> bool {
        self.capacity() <= MAX_POOLED_BUFFER
    }
}

pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    max_idle: usize,
}

impl<T> Pool<T> {
    /// Create an empty pool keeping at most `max_idle` released records
    pub const fn new(max_idle: usize) -> Self {
        Self {
            free: parking_lot::const_mutex(Vec::new()),
            max_idle,
        }
    }

    /// Number of records currently waiting on the free list
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl<T: Recycle> Pool<T> {
    /// Take a record from the free list, allocating one if the list is empty
    pub fn acquire(&self) -> Pooled<'_, T> {
        Pooled {
            pool: self,
            item: Some(self.take()),
        }
    }

    /// Like [`Pool::acquire`] but hands out the record by value, for records
    /// that move to another thread. Give it back with [`Pool::recycle`].
    pub fn take(&self) -> T {
        self.free.lock().pop().unwrap_or_default()
    }

    /// Reset `item` and keep it for reuse if there is room
    pub fn recycle(&self, mut item: T) {
        item.reset();
        if !item.reusable() {
            return;
        }
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(item);
        }
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

/// Exclusive handle to a pooled record
pub struct Pooled<'a, T: Recycle> {
    pool: &'a Pool<T>,
    item: Option<T>,
}

impl<T: Recycle> Pooled<'_, T> {
    /// Hand the record back to its pool
    pub fn release(self) {
        drop(self);
    }
}

impl<T: Recycle> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only `Drop` takes the item out.
        self.item.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<T: Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<T: Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.recycle(item);
        }
    }
}
