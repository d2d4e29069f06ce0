/// Decides how many slots the next chunk of a [`ChunkedHeap`](crate::ChunkedHeap) holds.
///
/// The heap calls [`chunk_capacity`](ChunkSizer::chunk_capacity) once per allocated chunk,
/// passing the number of chunks allocated so far. A growth that fails allocates nothing, so
/// the next insertion asks again with the same argument. Implementations must be pure: the
/// answer may depend on `chunks_allocated` only, and repeated calls with the same input must
/// agree.
///
/// Any `Fn(usize) -> usize` is a sizer, so a plain function or a non-capturing closure
/// works as well as the provided policies.
///
/// # Example
/// ```rust
/// use chunked_heap::{ChunkSizer, ChunkedHeap};
///
/// fn doubling(chunks_allocated: usize) -> usize {
///     4 << chunks_allocated.min(16)
/// }
///
/// assert_eq!(doubling.chunk_capacity(0), 4);
/// assert_eq!(doubling.chunk_capacity(2), 16);
///
/// let mut heap = ChunkedHeap::with_sizer(doubling);
/// heap.extend(0..5);
/// assert_eq!(heap.capacity(), 4 + 8);
/// ```
pub trait ChunkSizer {
    /// Returns the capacity of the chunk created after `chunks_allocated` chunks.
    ///
    /// A capacity of zero is rejected by the heap with
    /// [`Error::ZeroCapacity`](crate::Error::ZeroCapacity), one too large to be allocated
    /// with [`Error::CapacityOverflow`](crate::Error::CapacityOverflow).
    fn chunk_capacity(&self, chunks_allocated: usize) -> usize;
}

impl<F> ChunkSizer for F
where
    F: Fn(usize) -> usize,
{
    #[inline]
    fn chunk_capacity(&self, chunks_allocated: usize) -> usize {
        self(chunks_allocated)
    }
}

/// Gives every chunk the same capacity `N`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstantSizer<const N: usize>;

impl<const N: usize> ChunkSizer for ConstantSizer<N> {
    #[inline]
    fn chunk_capacity(&self, _chunks_allocated: usize) -> usize {
        N
    }
}

/// Gives the first chunk capacity `M` and every following chunk capacity `N`.
///
/// Useful to pre-size the heap for an expected load while keeping later growth
/// increments small.
///
/// # Example
/// ```rust
/// use chunked_heap::{ChunkSizer, PlannedSizer};
///
/// let sizer = PlannedSizer::<1024, 8>;
/// assert_eq!(sizer.chunk_capacity(0), 1024);
/// assert_eq!(sizer.chunk_capacity(1), 8);
/// assert_eq!(sizer.chunk_capacity(7), 8);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlannedSizer<const M: usize, const N: usize>;

impl<const M: usize, const N: usize> ChunkSizer for PlannedSizer<M, N> {
    #[inline]
    fn chunk_capacity(&self, chunks_allocated: usize) -> usize {
        if chunks_allocated == 0 { M } else { N }
    }
}
