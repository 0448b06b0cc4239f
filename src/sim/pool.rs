//! Fixed-capacity slot pools
//!
//! Projectiles and thruster trails live in preallocated arrays. A slot is
//! free when its entity says so; allocation is a linear scan for the first
//! free slot and fails (returns `None`) when the pool is full.

/// An entry that can occupy a pool slot
pub trait Slot: Default {
    /// True when this slot can be handed out again
    fn is_free(&self) -> bool;
}

/// Index of a slot inside its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle(pub usize);

/// Fixed-capacity array of slots, never reallocated after creation
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Box<[T]>,
}

impl<T: Slot> SlotPool<T> {
    /// Create a pool of `capacity` free slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    /// Create a pool whose slots are built by `init(index)`
    pub fn with_init(capacity: usize, init: impl FnMut(usize) -> T) -> Self {
        Self {
            slots: (0..capacity).map(init).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// First free slot, if any
    pub fn acquire(&mut self) -> Option<(SlotHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_free())
            .map(|(i, slot)| (SlotHandle(i), slot))
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.slots.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        self.slots.get_mut(handle.0)
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    pub fn live_count(&self) -> usize {
        self.capacity() - self.free_count()
    }

    /// All slots, free ones included, in index order
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Occupied slots in index order
    pub fn iter_live(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_free())
            .map(|(i, s)| (SlotHandle(i), s))
    }

    /// Occupied slots in index order, mutably
    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (SlotHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| !s.is_free())
            .map(|(i, s)| (SlotHandle(i), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Default, Clone)]
    struct Cell {
        taken: bool,
    }

    impl Slot for Cell {
        fn is_free(&self) -> bool {
            !self.taken
        }
    }

    #[test]
    fn test_acquire_until_full() {
        let mut pool: SlotPool<Cell> = SlotPool::new(3);
        for expected in 0..3 {
            let (handle, cell) = pool.acquire().expect("slot available");
            assert_eq!(handle, SlotHandle(expected));
            cell.taken = true;
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn test_freed_slot_is_reused_first() {
        let mut pool: SlotPool<Cell> = SlotPool::new(4);
        for _ in 0..4 {
            pool.acquire().unwrap().1.taken = true;
        }
        pool.get_mut(SlotHandle(2)).unwrap().taken = false;

        let (handle, _) = pool.acquire().unwrap();
        assert_eq!(handle, SlotHandle(2));
    }

    #[test]
    fn test_acquire_without_marking_does_not_consume() {
        let mut pool: SlotPool<Cell> = SlotPool::new(2);
        let first = pool.acquire().map(|(h, _)| h);
        let second = pool.acquire().map(|(h, _)| h);
        assert_eq!(first, second);
        assert_eq!(pool.free_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_live_plus_free_is_capacity(cap in 1usize..64, takes in 0usize..80) {
            let mut pool: SlotPool<Cell> = SlotPool::new(cap);
            let mut granted = 0;
            for _ in 0..takes {
                if let Some((_, cell)) = pool.acquire() {
                    cell.taken = true;
                    granted += 1;
                }
            }
            prop_assert_eq!(granted, takes.min(cap));
            prop_assert_eq!(pool.live_count() + pool.free_count(), cap);
            prop_assert_eq!(pool.iter_live().count(), granted);
        }
    }
}
