use core::iter::FusedIterator;

use allocator_api2::alloc::{Allocator, Global};

use crate::{ChunkedHeap, ConstantSizer};

/// An owning iterator over the elements of a ChunkedHeap, in logical order.
///
/// This struct is created by ChunkedHeap::into_iter().
#[derive(Clone)]
pub struct IntoIter<T, S = ConstantSizer<8>, A: Allocator = Global> {
    heap: ChunkedHeap<T, S, A>,
}

impl<T, S, A: Allocator> IntoIter<T, S, A> {
    pub(crate) fn from_heap(heap: ChunkedHeap<T, S, A>) -> Self {
        Self { heap }
    }
}

impl<T, S, A: Allocator> Iterator for IntoIter<T, S, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.heap.head?;
        self.heap.take(head)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }

    #[inline]
    fn count(self) -> usize {
        self.heap.len()
    }
}

impl<T, S, A: Allocator> ExactSizeIterator for IntoIter<T, S, A> {
    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T, S, A: Allocator> FusedIterator for IntoIter<T, S, A> {}

impl<T, S, A> core::fmt::Debug for IntoIter<T, S, A>
where
    T: core::fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.heap).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::{ChunkedHeap, ConstantSizer};

    #[test]
    fn into_iter_yields_elements_in_order() {
        let heap: ChunkedHeap<String, ConstantSizer<2>> =
            ["a", "b", "c"].into_iter().map(String::from).collect();

        let mut sut = heap.into_iter();
        assert_eq!(sut.len(), 3);
        assert_eq!(sut.next().as_deref(), Some("a"));
        assert_eq!(sut.len(), 2);
        assert_eq!(sut.collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn into_iter_follows_reused_slots() {
        let mut heap: ChunkedHeap<i64, ConstantSizer<2>> = ChunkedHeap::from([0, 1, 2, 3]);
        let handle = heap.begin().handle().unwrap();
        heap.erase(handle);
        heap.emplace(7);

        assert_eq!(heap.into_iter().collect::<Vec<_>>(), [7, 1, 2, 3]);
    }

    #[test]
    fn dropping_partially_consumed_iterator_drops_the_rest() {
        struct Counted<'a>(&'a Cell<usize>);

        impl Drop for Counted<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Cell::new(0);
        let heap: ChunkedHeap<Counted<'_>, ConstantSizer<2>> =
            (0..5).map(|_| Counted(&drops)).collect();

        let mut sut = heap.into_iter();
        drop(sut.next());
        assert_eq!(drops.get(), 1);

        drop(sut);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn debug_works_correctly() {
        let heap: ChunkedHeap<i64> = ChunkedHeap::from([1, 2]);
        let sut = heap.into_iter();
        assert_eq!(format!("{sut:?}"), "IntoIter([1, 2])");
    }
}
