use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use std::mem;

use allocator_api2::alloc::{AllocError, Allocator};

use crate::Handle;

/// Logical neighbours of a slot.
///
/// While the slot is occupied these are its true neighbours in the sequence.
/// Once it is freed they keep describing the neighbours it had when it was erased,
/// so that reusing the slot splices the new value back into the same position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub prev: Option<Handle>,
    pub next: Option<Handle>,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<T> {
    Unused,
    Occupied { value: T, links: Links },
    Freed { links: Links },
}

impl<T> Slot<T> {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Links of an occupied slot.
    #[inline]
    pub fn links(&self) -> Option<&Links> {
        match self {
            Slot::Occupied { links, .. } => Some(links),
            _ => None,
        }
    }

    /// Links of an occupied or freed slot.
    #[inline]
    pub fn links_mut(&mut self) -> Option<&mut Links> {
        match self {
            Slot::Occupied { links, .. } | Slot::Freed { links } => Some(links),
            Slot::Unused => None,
        }
    }

    /// Turns a freed slot back into an occupied one, returning the links it kept.
    pub fn refill(&mut self, value: T) -> Links {
        let Slot::Freed { links } = *self else {
            unreachable!("only freed slots can be refilled");
        };

        *self = Slot::Occupied { value, links };
        links
    }

    /// Takes the value out of an occupied slot, leaving it freed with its links intact.
    pub fn vacate(&mut self) -> Option<(T, Links)> {
        let links = *self.links()?;
        match mem::replace(self, Slot::Freed { links }) {
            Slot::Occupied { value, .. } => Some((value, links)),
            _ => unreachable!(),
        }
    }
}

/// A fixed-capacity block of slots.
///
/// The slot storage is a single allocation owned through a raw pointer, so its address
/// does not depend on where the `Chunk` itself lives, and a pointer to one slot stays
/// valid while other slots of the same chunk are borrowed.
///
/// A chunk does not remember the allocator it came from: its owner must hand the
/// storage back with [`Chunk::release`], otherwise the slots are leaked.
pub(crate) struct Chunk<T> {
    slots: NonNull<[Slot<T>]>,
    used: usize,
    marker: PhantomData<Slot<T>>,
}

impl<T> Chunk<T> {
    /// Layout of the storage of a chunk with `capacity` slots, `None` on overflow.
    pub fn layout(capacity: usize) -> Option<Layout> {
        Layout::array::<Slot<T>>(capacity).ok()
    }

    pub fn try_new_in<A: Allocator>(capacity: usize, alloc: &A) -> Result<Self, AllocError> {
        let layout = Self::layout(capacity).ok_or(AllocError)?;
        let base = alloc.allocate(layout)?.cast::<Slot<T>>();
        for index in 0..capacity {
            unsafe { base.add(index).write(Slot::Unused) };
        }

        Ok(Self {
            slots: NonNull::slice_from_raw_parts(base, capacity),
            used: 0,
            marker: PhantomData,
        })
    }

    /// Drops every slot and hands the storage back to `alloc`.
    ///
    /// # Safety
    /// `alloc` must be the allocator this chunk was created with.
    pub unsafe fn release<A: Allocator>(self, alloc: &A) {
        let layout = Layout::for_value(self.slots());
        unsafe {
            ptr::drop_in_place(self.slots.as_ptr());
            alloc.deallocate(self.slots.cast(), layout);
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots that left the `Unused` state.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.used == self.capacity()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot<T>] {
        unsafe { self.slots.as_ref() }
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [Slot<T>] {
        unsafe { self.slots.as_mut() }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        self.slots_mut().get_mut(index)
    }

    /// Pointer to the slot at `index`.
    ///
    /// Writing through it is sound only while the caller holds exclusive access to
    /// the chunk storage and no other reference to that very slot is alive.
    pub fn slot_ptr(&self, index: usize) -> NonNull<Slot<T>> {
        assert!(index < self.capacity());
        unsafe { self.slots.cast::<Slot<T>>().add(index) }
    }

    /// Occupies the first never-used slot and returns its index.
    pub fn push(&mut self, value: T, links: Links) -> usize {
        let index = self.used;
        let slot = &mut self.slots_mut()[index];
        debug_assert!(matches!(slot, Slot::Unused));

        *slot = Slot::Occupied { value, links };
        self.used += 1;
        index
    }

    /// Copies the used slots of `source`, which must have the same capacity.
    pub fn clone_from_chunk(&mut self, source: &Self)
    where
        T: Clone,
    {
        debug_assert_eq!(self.capacity(), source.capacity());
        let used = source.used;
        self.slots_mut()[..used].clone_from_slice(&source.slots()[..used]);
        self.used = used;
    }

    /// Drops every value and returns all slots to the `Unused` state.
    pub fn reset(&mut self) {
        let used = self.used;
        self.used = 0;
        self.slots_mut()[..used].fill_with(|| Slot::Unused);
    }
}

impl<T> core::fmt::Debug for Chunk<T>
where
    T: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chunk")
            .field("capacity", &self.capacity())
            .field("used", &self.used)
            .field("slots", &&self.slots()[..self.used])
            .finish()
    }
}

unsafe impl<T: Send> Send for Chunk<T> {}

unsafe impl<T: Sync> Sync for Chunk<T> {}
