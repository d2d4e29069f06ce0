use allocator_api2::alloc::{Allocator, Global};

use crate::{ChunkedHeap, Handle};

/// A forward-only cursor over a ChunkedHeap.
///
/// A cursor rests either on a live element or on the end sentinel, which sits after
/// the last element and never moves. Two cursors compare equal when they rest on the
/// same position of the same heap, so `heap.begin() == heap.end()` holds exactly when
/// the heap is empty.
pub struct Cursor<'a, T, S, A: Allocator = Global> {
    heap: &'a ChunkedHeap<T, S, A>,
    current: Option<Handle>,
}

impl<'a, T, S, A: Allocator> Cursor<'a, T, S, A> {
    pub(crate) fn new(heap: &'a ChunkedHeap<T, S, A>, current: Option<Handle>) -> Self {
        Self { heap, current }
    }

    pub fn as_heap(&self) -> &'a ChunkedHeap<T, S, A> {
        self.heap
    }

    /// Handle of the element under the cursor, `None` at the end sentinel.
    pub fn handle(&self) -> Option<Handle> {
        self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&'a T> {
        self.heap.get(self.current?)
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        self.heap.get(self.heap.next_of(self.current?)?)
    }

    /// Moves to the next element in logical order. Does nothing at the end sentinel.
    pub fn move_next(&mut self) {
        if let Some(current) = self.current {
            self.current = self.heap.next_of(current);
        }
    }
}

impl<T, S, A: Allocator> Clone for Cursor<'_, T, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S, A: Allocator> Copy for Cursor<'_, T, S, A> {}

impl<T, S, A: Allocator> PartialEq for Cursor<'_, T, S, A> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.heap, other.heap) && self.current == other.current
    }
}

impl<T, S, A: Allocator> Eq for Cursor<'_, T, S, A> {}

impl<T, S, A> core::fmt::Debug for Cursor<'_, T, S, A>
where
    T: core::fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Cursor")
            .field(&self.current)
            .field(&self.current())
            .finish()
    }
}
