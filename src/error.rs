use allocator_api2::alloc::AllocError;

/// Errors returned by the fallible insertion methods of a [`ChunkedHeap`](crate::ChunkedHeap).
///
/// Every variant leaves the heap exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The sizer asked for an empty chunk.
    #[error("chunk sizer returned a zero capacity for chunk {chunk}")]
    ZeroCapacity { chunk: usize },

    /// The sizer asked for a chunk larger than any allocation can be.
    #[error("capacity {capacity} of chunk {chunk} exceeds the maximum allocation size")]
    CapacityOverflow { chunk: usize, capacity: usize },

    /// The allocator could not provide storage for a new chunk.
    #[error("failed to allocate chunk {chunk} with capacity {capacity}")]
    AllocationFailed {
        chunk: usize,
        capacity: usize,
        #[source]
        source: AllocError,
    },
}

#[cfg(test)]
mod tests {
    use allocator_api2::alloc::AllocError;

    use super::Error;

    #[test]
    fn test_display_names_the_failing_chunk() {
        let sut = Error::ZeroCapacity { chunk: 3 };
        assert_eq!(
            sut.to_string(),
            "chunk sizer returned a zero capacity for chunk 3"
        );

        let sut = Error::CapacityOverflow {
            chunk: 2,
            capacity: usize::MAX,
        };
        assert_eq!(
            sut.to_string(),
            format!(
                "capacity {} of chunk 2 exceeds the maximum allocation size",
                usize::MAX
            )
        );

        let sut = Error::AllocationFailed {
            chunk: 1,
            capacity: 64,
            source: AllocError,
        };
        assert_eq!(sut.to_string(), "failed to allocate chunk 1 with capacity 64");
        assert!(std::error::Error::source(&sut).is_some());
    }
}
