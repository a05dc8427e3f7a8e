//! Fixed-capacity slot arena with move-only handles
//!
//! An [`Arena`] owns up to `capacity` values of one node kind. Slots are
//! tracked by an occupancy bit set; a slot is occupied from the moment it is
//! allocated or reserved until its value is taken out or removed.
//!
//! Ownership of a slot is expressed by a [`Handle`], which is neither `Clone`
//! nor `Copy`. Consuming operations (`take`, `remove`) move the handle in, so
//! using a handle after it has been consumed is a compile error. The raw
//! [`SlotId`] key behind a handle is `Copy` and is checked at run time: every
//! slot carries a generation that is bumped on release, so a stale key is
//! reported instead of silently reading whatever reused the slot.
//!
//! Finding a free slot is a linear scan of the occupancy set, O(capacity) per
//! allocation.

use crate::error::{ArenaError, Result};
use fixedbitset::FixedBitSet;
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::warn;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one arena instance.
///
/// Uses NonZeroU32 so `Option<ArenaId>` stays four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(NonZeroU32);

impl ArenaId {
    fn fresh() -> Self {
        let raw = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);
        // Wrapped past u32::MAX; skip the reserved zero.
        ArenaId(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Raw, copyable key of one arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    arena: ArenaId,
    index: u32,
    generation: u32,
}

impl SlotId {
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Same arena and generation, different index. Only useful for probing
    /// the range checks.
    pub fn with_index(self, index: usize) -> Self {
        Self {
            index: u32::try_from(index).unwrap_or(u32::MAX),
            ..self
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.arena, self.index, self.generation)
    }
}

/// Exclusive ownership token for one arena slot.
#[must_use = "dropping a handle leaks its slot until the arena is cleared"]
pub struct Handle<T> {
    id: SlotId,
    populated: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(id: SlotId, populated: bool) -> Self {
        Self {
            id,
            populated,
            _marker: PhantomData,
        }
    }

    pub fn slot_id(&self) -> SlotId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.id.index()
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("slot", &self.id)
            .field("populated", &self.populated)
            .finish()
    }
}

/// Fixed-capacity pool of `T` values.
pub struct Arena<T> {
    id: ArenaId,
    cells: Vec<Option<T>>,
    generations: Vec<u32>,
    occupied: FixedBitSet,
    live: usize,
}

impl<T> Arena<T> {
    /// Creates an arena with `capacity` slots. Capacities above `u32::MAX`
    /// are clamped.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(u32::MAX as usize);
        let mut cells = Vec::with_capacity(capacity);
        cells.resize_with(capacity, || None);
        Self {
            id: ArenaId::fresh(),
            cells,
            generations: vec![0; capacity],
            occupied: FixedBitSet::with_capacity(capacity),
            live: 0,
        }
    }

    pub fn id(&self) -> ArenaId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied slots, populated or reserved.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn is_full(&self) -> bool {
        self.live == self.capacity()
    }

    /// Stores `value` in the first free slot.
    pub fn allocate(&mut self, value: T) -> Result<Handle<T>> {
        let index = self.claim()?;
        self.cells[index] = Some(value);
        Ok(Handle::new(self.slot_id(index), true))
    }

    /// Marks a free slot occupied without writing a value. The handle must be
    /// completed with [`populate`](Self::populate) before it can be borrowed.
    pub fn reserve(&mut self) -> Result<Handle<T>> {
        let index = self.claim()?;
        Ok(Handle::new(self.slot_id(index), false))
    }

    /// Writes the value of a reserved slot.
    pub fn populate(&mut self, handle: &mut Handle<T>, value: T) -> Result<()> {
        let index = self.live_index(handle.id)?;
        if handle.populated || self.cells[index].is_some() {
            return Err(ArenaError::AlreadyPopulated { slot: index });
        }
        self.cells[index] = Some(value);
        handle.populated = true;
        Ok(())
    }

    pub fn borrow(&self, handle: &Handle<T>) -> Result<&T> {
        self.get(handle.id)
    }

    pub fn borrow_mut(&mut self, handle: &Handle<T>) -> Result<&mut T> {
        self.get_mut(handle.id)
    }

    /// Moves the value out and frees the slot.
    ///
    /// Taking a reservation that was never populated still frees the slot,
    /// then reports [`ArenaError::Unpopulated`].
    pub fn take(&mut self, handle: Handle<T>) -> Result<T> {
        self.release(handle.id)
    }

    /// Frees the slot, dropping its value in place.
    pub fn remove(&mut self, handle: Handle<T>) -> Result<()> {
        self.remove_slot(handle.id)
    }

    pub fn get(&self, id: SlotId) -> Result<&T> {
        let index = self.live_index(id)?;
        self.cells[index]
            .as_ref()
            .ok_or(ArenaError::Unpopulated { slot: index })
    }

    pub fn get_mut(&mut self, id: SlotId) -> Result<&mut T> {
        let index = self.live_index(id)?;
        self.cells[index]
            .as_mut()
            .ok_or(ArenaError::Unpopulated { slot: index })
    }

    /// Raw-key form of [`take`](Self::take).
    pub fn release(&mut self, id: SlotId) -> Result<T> {
        let index = self.releasable_index(id)?;
        let value = self.cells[index].take();
        self.vacate(index);
        value.ok_or(ArenaError::Unpopulated { slot: index })
    }

    /// Raw-key form of [`remove`](Self::remove). Removing an unpopulated
    /// reservation is allowed; it is how a reservation is abandoned.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<()> {
        let index = self.releasable_index(id)?;
        drop(self.cells[index].take());
        self.vacate(index);
        Ok(())
    }

    /// Frees every slot at once. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for index in self.occupied.ones() {
            self.cells[index] = None;
            self.generations[index] = self.generations[index].wrapping_add(1);
        }
        self.occupied.clear();
        self.live = 0;
    }

    /// Iterates over populated slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        self.occupied.ones().filter_map(move |index| {
            self.cells[index]
                .as_ref()
                .map(|value| (self.slot_id(index), value))
        })
    }

    fn claim(&mut self) -> Result<usize> {
        let free = (0..self.capacity()).find(|&index| !self.occupied.contains(index));
        match free {
            Some(index) => {
                self.occupied.insert(index);
                self.live += 1;
                Ok(index)
            }
            None => {
                warn!(arena = %self.id, capacity = self.capacity(), "arena exhausted");
                Err(ArenaError::AllocationExhausted {
                    capacity: self.capacity(),
                })
            }
        }
    }

    fn vacate(&mut self, index: usize) {
        self.occupied.set(index, false);
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.live -= 1;
    }

    fn slot_id(&self, index: usize) -> SlotId {
        SlotId {
            arena: self.id,
            index: index as u32,
            generation: self.generations[index],
        }
    }

    fn checked_index(&self, id: SlotId) -> Result<usize> {
        let index = id.index();
        if id.arena != self.id {
            return Err(ArenaError::ForeignHandle { slot: index });
        }
        if index >= self.capacity() {
            return Err(ArenaError::OutOfRange {
                slot: index,
                capacity: self.capacity(),
            });
        }
        Ok(index)
    }

    fn is_current(&self, id: SlotId, index: usize) -> bool {
        self.occupied.contains(index) && self.generations[index] == id.generation
    }

    fn live_index(&self, id: SlotId) -> Result<usize> {
        let index = self.checked_index(id)?;
        if !self.is_current(id, index) {
            return Err(ArenaError::UseAfterFree { slot: index });
        }
        Ok(index)
    }

    fn releasable_index(&self, id: SlotId) -> Result<usize> {
        let index = self.checked_index(id)?;
        if !self.is_current(id, index) {
            return Err(ArenaError::DoubleFree { slot: index });
        }
        Ok(index)
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("capacity", &self.capacity())
            .field("len", &self.live)
            .finish()
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
