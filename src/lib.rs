//! # chunked_heap
//!
//! `chunked_heap` implements a container that sits between a `Vec`, a `LinkedList`
//! and a slab: elements never move once inserted, yet iterating over them walks
//! through a handful of densely packed chunks instead of scattered nodes.
//!
//! ## Features
//! - Stable addresses: an element stays at the same place in memory until it is erased,
//!   so [`Handle`]s (and even raw pointers) to it remain valid across any number of
//!   insertions and removals of other elements.
//! - Chunked storage: slots are allocated in blocks whose sizes are chosen by a
//!   pluggable [`ChunkSizer`]. Chunks are never resized nor released before the heap.
//! - Slot reuse: erased slots are kept on a LIFO free list and refilled before any new
//!   storage is touched.
//! - Logical order: every slot carries links to its neighbours, so iteration visits the
//!   live elements in sequence no matter how they are scattered among chunks.
//! - Custom allocators: chunk storage comes from any [`allocator_api2`] allocator, the
//!   global one by default.
//!
//! ## Ordering
//! Without erasures, elements are iterated in insertion order. Refilling an erased slot
//! puts the new element back at the position the erased one occupied, not at the end.
//!
//! ## Use Cases
//! `chunked_heap` is ideal for scenarios where:
//! - The collection must be iterated through as fast as possible.
//! - Elements are referenced from elsewhere and therefore must never move.
//! - Lookup by key or by position is not needed.
//!
//! ## Example
//! ```rust
//! use chunked_heap::ChunkedHeap;
//!
//! let mut heap: ChunkedHeap<&str> = ChunkedHeap::new();
//! let a = heap.emplace("a");
//! let b = heap.emplace("b");
//! heap.emplace("c");
//!
//! assert_eq!(heap.erase(b), Some("b"));
//! let x = heap.emplace("x");
//!
//! assert_eq!(x, b);
//! assert_eq!(heap[a], "a");
//! assert_eq!(heap, ["a", "x", "c"]);
//! ```

mod chunk;
mod cursor;
mod cursor_mut;
mod error;
mod into_iter;
mod iter;
mod iter_mut;
mod sizer;

pub use cursor::Cursor;
pub use cursor_mut::CursorMut;
pub use error::Error;
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;
pub use sizer::{ChunkSizer, ConstantSizer, PlannedSizer};

use std::alloc::Layout;
use std::ops::{Index, IndexMut};

use allocator_api2::alloc::{AllocError, Allocator, Global};

use crate::chunk::{Chunk, Links, Slot};

/// Identifies a slot of a [`ChunkedHeap`] by chunk and position inside that chunk.
///
/// A handle returned by an insertion refers to the inserted element until that element
/// is erased. Afterwards the slot may be refilled by a later insertion, and the handle
/// then refers to the new element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    chunk: usize,
    index: usize,
}

impl Handle {
    #[inline]
    pub(crate) const fn new(chunk: usize, index: usize) -> Self {
        Self { chunk, index }
    }

    /// Index of the chunk holding the slot, in chunk creation order.
    #[inline]
    pub const fn chunk(&self) -> usize {
        self.chunk
    }

    /// Position of the slot inside its chunk.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// A container with stable element addresses and cache friendly iteration.
///
/// # Features
/// - **Stable Slots**: elements are never moved, a [`Handle`] keeps pointing at the same
///   element until that element is erased.
/// - **Chunked Storage**: slots live in chunks whose capacities are decided by `S`.
/// - **Free List**: erased slots are refilled, most recently erased first, before new
///   storage is used.
///
/// # Type Parameters
/// - `T`: The type of elements stored in the heap.
/// - `S`: The [`ChunkSizer`] choosing the capacity of each new chunk.
/// - `A`: The [`Allocator`] providing the storage of every chunk.
///
/// # Example
/// ```rust
/// use chunked_heap::{ChunkedHeap, PlannedSizer};
///
/// let mut heap: ChunkedHeap<i64, PlannedSizer<3, 8>> = ChunkedHeap::default();
/// let one = heap.emplace(1);
/// heap.emplace(2);
/// heap.emplace(3);
/// assert_eq!(heap.chunk_count(), 1);
///
/// heap.emplace(4);
/// assert_eq!(heap.chunk_count(), 2);
/// assert_eq!(heap.capacity(), 11);
///
/// heap[one] = 10;
/// assert_eq!(heap.iter().sum::<i64>(), 19);
/// ```
pub struct ChunkedHeap<T, S = ConstantSizer<8>, A: Allocator = Global> {
    chunks: Vec<Chunk<T>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    active: usize,
    len: usize,
    sizer: S,
    alloc: A,
}

impl<T> ChunkedHeap<T> {
    /// Creates a new, empty `ChunkedHeap` using the default sizer and no allocated chunks.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let heap: ChunkedHeap<i64> = ChunkedHeap::new();
    ///
    /// assert!(heap.is_empty());
    /// assert_eq!(heap.chunk_count(), 0);
    /// ```
    pub const fn new() -> Self {
        Self::with_sizer(ConstantSizer)
    }
}

impl<T, S> ChunkedHeap<T, S> {
    /// Creates a new, empty `ChunkedHeap` growing according to `sizer`.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap = ChunkedHeap::with_sizer(|chunks_allocated: usize| 2 + chunks_allocated);
    /// heap.extend(0..5);
    ///
    /// assert_eq!(heap.chunk_count(), 2);
    /// assert_eq!(heap.capacity(), 5);
    /// ```
    pub const fn with_sizer(sizer: S) -> Self {
        Self::with_sizer_in(sizer, Global)
    }
}

impl<T, S, A: Allocator> ChunkedHeap<T, S, A> {
    /// Creates a new, empty `ChunkedHeap` growing according to `sizer` and taking the
    /// storage of its chunks from `alloc`.
    ///
    /// # Example
    /// ```rust
    /// use allocator_api2::alloc::Global;
    /// use chunked_heap::{ChunkedHeap, ConstantSizer};
    ///
    /// let mut heap: ChunkedHeap<&str, _, _> =
    ///     ChunkedHeap::with_sizer_in(ConstantSizer::<4>, Global);
    /// heap.extend(["a", "b"]);
    ///
    /// assert_eq!(heap.capacity(), 4);
    /// ```
    pub const fn with_sizer_in(sizer: S, alloc: A) -> Self {
        Self {
            chunks: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            active: 0,
            len: 0,
            sizer,
            alloc,
        }
    }

    /// Returns the sizer of this heap.
    #[inline]
    pub fn sizer(&self) -> &S {
        &self.sizer
    }

    /// Returns the allocator backing the chunks of this heap.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of live elements.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// let first = heap.emplace(1);
    /// heap.emplace(2);
    /// heap.erase(first);
    ///
    /// assert_eq!(heap.len(), 1);
    /// ```
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the `ChunkedHeap` holds no live element.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of chunks allocated so far.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the total number of slots across all chunks.
    pub fn capacity(&self) -> usize {
        self.chunks.iter().map(Chunk::capacity).sum()
    }

    /// Returns `true` if `handle` refers to a live element of this heap.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// let handle = heap.emplace(1);
    /// assert!(heap.contains(handle));
    ///
    /// heap.erase(handle);
    /// assert!(!heap.contains(handle));
    /// ```
    pub fn contains(&self, handle: Handle) -> bool {
        self.slot(handle).is_some_and(Slot::is_occupied)
    }

    /// Returns a reference to the element behind `handle`, if it is alive.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// let handle = heap.emplace(10);
    ///
    /// assert_eq!(heap.get(handle), Some(&10));
    /// heap.erase(handle);
    /// assert_eq!(heap.get(handle), None);
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle)?.value()
    }

    /// Returns a mutable reference to the element behind `handle`, if it is alive.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// let handle = heap.emplace(10);
    ///
    /// if let Some(value) = heap.get_mut(handle) {
    ///     *value += 1;
    /// }
    /// assert_eq!(heap[handle], 11);
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slot_mut(handle)?.value_mut()
    }

    /// Returns a reference to the first element in iteration order, if any.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// assert_eq!(heap.front(), None);
    ///
    /// let first = heap.emplace(10);
    /// heap.emplace(20);
    /// assert_eq!(heap.front(), Some(&10));
    ///
    /// heap.erase(first);
    /// assert_eq!(heap.front(), Some(&20));
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    /// Returns a mutable reference to the first element in iteration order, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.head?)
    }

    /// Erases the element behind `handle` and returns it.
    ///
    /// The element's neighbours are linked to each other and the slot is pushed on the
    /// free list, to be refilled by the next insertion. Returns `None` without touching
    /// the heap if `handle` does not refer to a live element.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// heap.emplace(1);
    /// let two = heap.emplace(2);
    /// heap.emplace(3);
    ///
    /// assert_eq!(heap.erase(two), Some(2));
    /// assert_eq!(heap.erase(two), None);
    /// assert_eq!(heap, [1, 3]);
    /// ```
    pub fn erase(&mut self, handle: Handle) -> Option<T> {
        let value = self.take(handle)?;
        self.free.push(handle);
        Some(value)
    }

    /// Erases the first element in iteration order and returns it.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::from([1, 2]);
    ///
    /// assert_eq!(heap.pop_front(), Some(1));
    /// assert_eq!(heap.pop_front(), Some(2));
    /// assert_eq!(heap.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.erase(self.head?)
    }

    /// Keeps only the elements for which `f` returns `true`, visiting them in order.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::from([1, 2, 3, 4, 5]);
    /// heap.retain(|value| *value % 2 == 1);
    ///
    /// assert_eq!(heap, [1, 3, 5]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut cursor = self.begin_mut();
        while let Some(value) = cursor.current() {
            if f(value) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }

    /// Drops every element, keeping the allocated chunks for later insertions.
    ///
    /// Handles obtained before clearing must not be used afterwards: their slots will
    /// be handed out again.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::from([1, 2, 3]);
    /// let capacity = heap.capacity();
    ///
    /// heap.clear();
    ///
    /// assert!(heap.is_empty());
    /// assert_eq!(heap.front(), None);
    /// assert_eq!(heap.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.chunks.iter_mut().for_each(Chunk::reset);
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.active = 0;
        self.len = 0;

        tracing::trace!(chunks = self.chunks.len(), "cleared chunked heap");
    }

    /// Provides a cursor at the first element, or at the end if the heap is empty.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<i64> = ChunkedHeap::new();
    /// assert!(heap.begin() == heap.end());
    ///
    /// heap.emplace(1);
    /// let mut cursor = heap.begin();
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_next();
    /// assert!(cursor == heap.end());
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T, S, A> {
        Cursor::new(self, self.head)
    }

    /// Provides a cursor at the end sentinel.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T, S, A> {
        Cursor::new(self, None)
    }

    /// Provides a mutable cursor at the first element, or at the end if the heap is empty.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, S, A> {
        let head = self.head;
        CursorMut::new(self, head)
    }

    /// Provides a cursor at the element behind `handle`, if it is alive.
    pub fn cursor(&self, handle: Handle) -> Option<Cursor<'_, T, S, A>> {
        if !self.contains(handle) {
            return None;
        }

        Some(Cursor::new(self, Some(handle)))
    }

    /// Provides a mutable cursor at the element behind `handle`, if it is alive.
    pub fn cursor_mut(&mut self, handle: Handle) -> Option<CursorMut<'_, T, S, A>> {
        if !self.contains(handle) {
            return None;
        }

        Some(CursorMut::new(self, Some(handle)))
    }

    /// Provides an iterator over the elements in logical order.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let heap: ChunkedHeap<_> = ChunkedHeap::from([0, 1, 2]);
    ///
    /// let mut iter = heap.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::from_heap(self)
    }

    /// Provides a mutable iterator over the elements in logical order.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<_> = ChunkedHeap::from([0, 1, 2]);
    /// heap.iter_mut().for_each(|value| *value *= 10);
    ///
    /// assert_eq!(heap, [0, 10, 20]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::from_heap(self)
    }

    #[inline]
    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.chunks.get(handle.chunk)?.get(handle.index)
    }

    #[inline]
    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        self.chunks.get_mut(handle.chunk)?.get_mut(handle.index)
    }

    fn next_of(&self, handle: Handle) -> Option<Handle> {
        self.slot(handle)?.links()?.next
    }

    fn set_next(&mut self, at: Handle, next: Option<Handle>) {
        if let Some(links) = self.slot_mut(at).and_then(Slot::links_mut) {
            links.next = next;
        }
    }

    fn set_prev(&mut self, at: Handle, prev: Option<Handle>) {
        if let Some(links) = self.slot_mut(at).and_then(Slot::links_mut) {
            links.prev = prev;
        }
    }

    /// Unlinks the element behind `handle` without registering its slot for reuse.
    fn take(&mut self, handle: Handle) -> Option<T> {
        let (value, links) = self.slot_mut(handle)?.vacate()?;

        if let Some(prev) = links.prev {
            self.set_next(prev, links.next);
        }

        if let Some(next) = links.next {
            self.set_prev(next, links.prev);
        }

        if self.head == Some(handle) {
            self.head = links.next;
        }

        self.len -= 1;
        Some(value)
    }
}

impl<T, S, A> ChunkedHeap<T, S, A>
where
    S: ChunkSizer,
    A: Allocator,
{
    /// Inserts `value` and returns the handle of its slot.
    ///
    /// The most recently erased slot is refilled if there is one, in which case the
    /// element takes the logical position the erased element had. Otherwise the
    /// element is appended after the last one, allocating a new chunk if needed.
    ///
    /// # Panics
    /// - Panics if a new chunk is needed and it cannot be allocated,
    ///   see [`try_emplace`](ChunkedHeap::try_emplace).
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::ChunkedHeap;
    ///
    /// let mut heap: ChunkedHeap<&str> = ChunkedHeap::new();
    /// heap.emplace("a");
    /// let b = heap.emplace("b");
    /// heap.emplace("c");
    /// heap.emplace("d");
    ///
    /// heap.erase(b);
    /// heap.emplace("x");
    ///
    /// assert_eq!(heap, ["a", "x", "c", "d"]);
    /// ```
    pub fn emplace(&mut self, value: T) -> Handle {
        self.emplace_with(|_| value)
    }

    /// Inserts the value built by `f`, which receives the handle the value will live at.
    ///
    /// The slot is chosen before `f` runs but only claimed once it returns: if `f`
    /// panics the heap is left exactly as it was.
    ///
    /// # Panics
    /// - Panics if a new chunk is needed and it cannot be allocated.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::{ChunkedHeap, Handle};
    ///
    /// let mut heap: ChunkedHeap<(Handle, &str)> = ChunkedHeap::new();
    /// let handle = heap.emplace_with(|handle| (handle, "self aware"));
    ///
    /// assert_eq!(heap[handle].0, handle);
    /// ```
    pub fn emplace_with<F>(&mut self, f: F) -> Handle
    where
        F: FnOnce(Handle) -> T,
    {
        match self.try_emplace_with(f) {
            Ok(handle) => handle,
            Err(error) => panic!("{error}"),
        }
    }

    /// Inserts `value`, reporting chunk allocation failures instead of panicking.
    ///
    /// On error the heap is unchanged, and the sizer is asked again for the same chunk
    /// by the next insertion.
    ///
    /// # Example
    /// ```rust
    /// use chunked_heap::{ChunkedHeap, Error};
    ///
    /// let mut heap = ChunkedHeap::with_sizer(|_: usize| 0_usize);
    ///
    /// assert_eq!(heap.try_emplace(1), Err(Error::ZeroCapacity { chunk: 0 }));
    /// assert!(heap.is_empty());
    /// ```
    pub fn try_emplace(&mut self, value: T) -> Result<Handle, Error> {
        self.try_emplace_with(|_| value)
    }

    /// Inserts the value built by `f`, reporting chunk allocation failures instead of
    /// panicking. On error `f` is not called and the heap is unchanged.
    pub fn try_emplace_with<F>(&mut self, f: F) -> Result<Handle, Error>
    where
        F: FnOnce(Handle) -> T,
    {
        if let Some(&handle) = self.free.last() {
            let value = f(handle);
            self.free.pop();
            self.relink(handle, value);
            return Ok(handle);
        }

        let handle = self.next_unused()?;
        let value = f(handle);
        self.append(handle, value);
        Ok(handle)
    }

    /// Finds the next never-used slot, allocating a chunk when every chunk is full.
    fn next_unused(&mut self) -> Result<Handle, Error> {
        while let Some(chunk) = self.chunks.get(self.active) {
            if !chunk.is_full() {
                return Ok(Handle::new(self.active, chunk.used()));
            }

            if self.active + 1 >= self.chunks.len() {
                break;
            }

            self.active += 1;
        }

        self.grow()?;
        Ok(Handle::new(self.active, 0))
    }

    fn grow(&mut self) -> Result<(), Error> {
        let chunk = self.chunks.len();
        let capacity = self.sizer.chunk_capacity(chunk);
        if capacity == 0 {
            return Err(Error::ZeroCapacity { chunk });
        }

        if Chunk::<T>::layout(capacity).is_none() {
            return Err(Error::CapacityOverflow { chunk, capacity });
        }

        let allocation_failed = |source| Error::AllocationFailed {
            chunk,
            capacity,
            source,
        };

        self.chunks
            .try_reserve(1)
            .map_err(|_| allocation_failed(AllocError))?;
        let storage = Chunk::try_new_in(capacity, &self.alloc).map_err(allocation_failed)?;
        self.chunks.push(storage);
        self.active = chunk;

        tracing::debug!(chunk, capacity, "allocated chunk");
        Ok(())
    }

    fn append(&mut self, handle: Handle, value: T) {
        let prev = self.tail;
        let index = self.chunks[handle.chunk].push(value, Links { prev, next: None });
        debug_assert_eq!(index, handle.index);

        if let Some(prev) = prev {
            self.set_next(prev, Some(handle));
        }

        if self.head.is_none() {
            self.head = Some(handle);
        }

        self.tail = Some(handle);
        self.len += 1;
    }

    /// Refills a freed slot and splices it back between the neighbours it had when erased.
    fn relink(&mut self, handle: Handle, value: T) {
        let Some(slot) = self.slot_mut(handle) else {
            unreachable!("free list refers to a missing slot");
        };

        let links = slot.refill(value);

        if let Some(prev) = links.prev {
            self.set_next(prev, Some(handle));
        }

        if let Some(next) = links.next {
            self.set_prev(next, Some(handle));
        }

        if links.next == self.head {
            self.head = Some(handle);
        }

        self.len += 1;
    }
}

impl<T, S, A: Allocator> Drop for ChunkedHeap<T, S, A> {
    fn drop(&mut self) {
        for chunk in self.chunks.drain(..) {
            unsafe { chunk.release(&self.alloc) };
        }
    }
}

impl<T, S, A> Clone for ChunkedHeap<T, S, A>
where
    T: Clone,
    S: Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        let mut this = Self::with_sizer_in(self.sizer.clone(), self.alloc.clone());
        this.chunks.reserve_exact(self.chunks.len());

        for chunk in &self.chunks {
            let storage = match Chunk::try_new_in(chunk.capacity(), &this.alloc) {
                Ok(storage) => storage,
                Err(_) => std::alloc::handle_alloc_error(Layout::for_value(chunk.slots())),
            };

            this.chunks.push(storage);
            if let Some(copy) = this.chunks.last_mut() {
                copy.clone_from_chunk(chunk);
            }
        }

        this.free.clone_from(&self.free);
        this.head = self.head;
        this.tail = self.tail;
        this.active = self.active;
        this.len = self.len;
        this
    }
}

impl<T, S> Default for ChunkedHeap<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_sizer(S::default())
    }
}

impl<T, S, const M: usize> From<[T; M]> for ChunkedHeap<T, S>
where
    S: ChunkSizer + Default,
{
    fn from(values: [T; M]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, S> FromIterator<T> for ChunkedHeap<T, S>
where
    S: ChunkSizer + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::default();
        this.extend(iter);
        this
    }
}

impl<T, S, A> Extend<T> for ChunkedHeap<T, S, A>
where
    S: ChunkSizer,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| {
            self.emplace(value);
        });
    }
}

impl<'a, T, S, A> Extend<&'a T> for ChunkedHeap<T, S, A>
where
    T: Clone,
    S: ChunkSizer,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, S, A: Allocator> Index<Handle> for ChunkedHeap<T, S, A> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("invalid handle: {handle:?}"),
        }
    }
}

impl<T, S, A: Allocator> IndexMut<Handle> for ChunkedHeap<T, S, A> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("invalid handle: {handle:?}"),
        }
    }
}

impl<T, S, A, const M: usize> PartialEq<[T; M]> for ChunkedHeap<T, S, A>
where
    T: PartialEq,
    A: Allocator,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, S, A> PartialEq<&[T]> for ChunkedHeap<T, S, A>
where
    T: PartialEq,
    A: Allocator,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, S, A> PartialEq<[T]> for ChunkedHeap<T, S, A>
where
    T: PartialEq,
    A: Allocator,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, S, A> PartialEq for ChunkedHeap<T, S, A>
where
    T: PartialEq,
    A: Allocator,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, S, A> Eq for ChunkedHeap<T, S, A>
where
    T: Eq,
    A: Allocator,
{
}

impl<T, S, A> std::fmt::Debug for ChunkedHeap<T, S, A>
where
    T: std::fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, S, A: Allocator> IntoIterator for ChunkedHeap<T, S, A> {
    type Item = T;
    type IntoIter = IntoIter<T, S, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::from_heap(self)
    }
}

impl<'a, T, S, A: Allocator> IntoIterator for &'a ChunkedHeap<T, S, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::from_heap(self)
    }
}

impl<'a, T, S, A: Allocator> IntoIterator for &'a mut ChunkedHeap<T, S, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut::from_heap(self)
    }
}
