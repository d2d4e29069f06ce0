use allocator_api2::alloc::{Allocator, Global};

use crate::{ChunkedHeap, Cursor, Handle};

/// A forward-only cursor over a ChunkedHeap with editing operations.
///
/// Besides mutating the element under it, a `CursorMut` can erase that element and
/// move on to its successor in one step, which makes removing elements while walking
/// the heap straightforward.
pub struct CursorMut<'a, T, S, A: Allocator = Global> {
    heap: &'a mut ChunkedHeap<T, S, A>,
    current: Option<Handle>,
}

impl<'a, T, S, A: Allocator> CursorMut<'a, T, S, A> {
    pub(crate) fn new(heap: &'a mut ChunkedHeap<T, S, A>, current: Option<Handle>) -> Self {
        Self { heap, current }
    }

    pub fn as_cursor(&self) -> Cursor<'_, T, S, A> {
        Cursor::new(self.heap, self.current)
    }

    pub fn as_heap(&self) -> &ChunkedHeap<T, S, A> {
        self.heap
    }

    pub fn handle(&self) -> Option<Handle> {
        self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&mut self) -> Option<&mut T> {
        self.heap.get_mut(self.current?)
    }

    pub fn peek_next(&mut self) -> Option<&mut T> {
        let next = self.heap.next_of(self.current?)?;
        self.heap.get_mut(next)
    }

    pub fn move_next(&mut self) {
        if let Some(current) = self.current {
            self.current = self.heap.next_of(current);
        }
    }

    /// Erases the element under the cursor and moves to its successor.
    ///
    /// Returns `None` at the end sentinel.
    pub fn remove_current(&mut self) -> Option<T> {
        let current = self.current?;
        let next = self.heap.next_of(current);
        let value = self.heap.erase(current)?;
        self.current = next;
        Some(value)
    }
}

impl<T, S, A> core::fmt::Debug for CursorMut<'_, T, S, A>
where
    T: core::fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&self.current)
            .field(&self.as_cursor().current())
            .finish()
    }
}
