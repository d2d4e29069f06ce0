use core::iter::FusedIterator;
use core::marker::PhantomData;

use allocator_api2::alloc::Allocator;

use crate::chunk::{Chunk, Slot};
use crate::{ChunkedHeap, Handle};

/// A mutable iterator over the elements of a ChunkedHeap, in logical order.
///
/// This struct is created by ChunkedHeap::iter_mut().
pub struct IterMut<'a, T> {
    // Borrowed out of an exclusive borrow of the heap: slots are only reached through
    // the chunks' raw storage pointers, and every slot is visited at most once.
    chunks: &'a [Chunk<T>],
    next: Option<Handle>,
    len: usize,
    marker: PhantomData<&'a mut T>,
}

impl<T> Default for IterMut<'_, T> {
    fn default() -> Self {
        Self {
            chunks: &[],
            next: None,
            len: 0,
            marker: PhantomData,
        }
    }
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn from_heap<S, A: Allocator>(heap: &'a mut ChunkedHeap<T, S, A>) -> Self {
        Self {
            chunks: &heap.chunks,
            next: heap.head,
            len: heap.len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let chunk = self.chunks.get(handle.chunk)?;
        if handle.index >= chunk.capacity() {
            return None;
        }

        let slot: &'a mut Slot<T> = unsafe { chunk.slot_ptr(handle.index).as_mut() };
        let Slot::Occupied { value, links } = slot else {
            return None;
        };

        self.next = links.next;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> core::fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IterMut")
            .field("next", &self.next)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChunkedHeap, ConstantSizer};

    use super::IterMut;

    #[test]
    fn default_iterator_yields_nothing() {
        let mut sut: IterMut<i32> = Default::default();
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.next(), None);
    }

    #[test]
    fn iter_mut_updates_every_element_in_order() {
        let mut heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2, 3, 4]);

        let mut seen = Vec::new();
        for value in heap.iter_mut() {
            seen.push(*value);
            *value += 10;
        }

        assert_eq!(seen, [0, 1, 2, 3, 4]);
        assert_eq!(heap, [10, 11, 12, 13, 14]);
    }

    #[test]
    fn iter_mut_references_can_coexist() {
        let mut heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2]);

        let mut references: Vec<&mut usize> = heap.iter_mut().collect();
        assert_eq!(references.len(), 3);
        *references[2] = 20;
        *references[1] = 10;

        assert_eq!(heap, [0, 10, 20]);
    }

    #[test]
    fn iter_mut_follows_reused_slots() {
        let mut heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2, 3]);
        let handle = heap.begin().handle().unwrap();
        heap.erase(handle);
        heap.emplace(9);

        let mut sut = heap.iter_mut();
        assert_eq!(sut.len(), 4);
        assert_eq!(sut.next().copied(), Some(9));
        assert_eq!(sut.len(), 3);
        assert_eq!(sut.map(|value| *value).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn debug_works_correctly() {
        let mut heap: ChunkedHeap<usize> = ChunkedHeap::new();
        let sut = heap.iter_mut();
        assert_eq!(format!("{sut:?}"), "IterMut { next: None, len: 0 }");
    }
}
