use core::iter::FusedIterator;

use allocator_api2::alloc::Allocator;

use crate::chunk::{Chunk, Slot};
use crate::{ChunkedHeap, Handle};

/// An iterator over the elements of a ChunkedHeap, in logical order.
///
/// This struct is created by ChunkedHeap::iter().
pub struct Iter<'a, T> {
    chunks: &'a [Chunk<T>],
    next: Option<Handle>,
    len: usize,
}

impl<T> Default for Iter<'_, T> {
    fn default() -> Self {
        Self {
            chunks: &[],
            next: None,
            len: 0,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn from_heap<S, A: Allocator>(heap: &'a ChunkedHeap<T, S, A>) -> Self {
        Self {
            chunks: &heap.chunks,
            next: heap.head,
            len: heap.len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let Slot::Occupied { value, links } = self.chunks.get(handle.chunk)?.get(handle.index)?
        else {
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

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> core::fmt::Debug for Iter<'_, T>
where
    T: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .field(&self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChunkedHeap, ConstantSizer};

    use super::Iter;

    #[test]
    fn default_iterator_yields_nothing() {
        let mut sut: Iter<i32> = Default::default();
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.next(), None);
    }

    #[test]
    fn iter_forward() {
        let mut heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2, 3, 4]);
        let sut = heap.iter();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[0, 1, 2, 3, 4]);

        heap.clear();
        let sut = heap.iter();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[]);
    }

    #[test]
    fn iter_skips_erased_elements() {
        let mut heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::default();
        let handles: Vec<_> = (0..5).map(|value| heap.emplace(value)).collect();
        heap.erase(handles[0]);
        heap.erase(handles[2]);
        heap.erase(handles[4]);

        let sut = heap.iter();
        assert_eq!(sut.len(), 2);
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[1, 3]);
    }

    #[test]
    fn exact_size_shrinks_while_iterating() {
        let heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2]);

        let mut sut = heap.iter();
        assert_eq!(sut.len(), 3);
        assert_eq!(sut.next(), Some(&0));
        assert_eq!(sut.len(), 2);
        assert_eq!(sut.next(), Some(&1));
        assert_eq!(sut.next(), Some(&2));
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.next(), None);
        assert_eq!(sut.next(), None);
    }

    #[test]
    fn clone_works_correctly() {
        let heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2, 3, 4]);

        let mut base = heap.iter();

        let sut = base.clone();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[0, 1, 2, 3, 4]);

        base.next();

        let sut = base.clone();
        assert_eq!(&sut.copied().collect::<Vec<_>>(), &[1, 2, 3, 4]);
    }

    #[test]
    fn debug_works_correctly() {
        let array = [0, 1, 2, 3, 4];
        let heap: ChunkedHeap<usize, ConstantSizer<2>> = ChunkedHeap::from(array);
        let sut = heap.iter();
        assert_eq!(
            format!("{sut:?}"),
            format!("Iter({:?}, {})", array, array.len())
        );
    }
}
