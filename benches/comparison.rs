//! Benchmark for ChunkedHeap vs the standard collections.
//!
//! Every container runs the same scenario:
//! 1. insert `n` elements
//! 2. insert one more and remember where it is
//! 3. insert `n` more elements
//! 4. remove the remembered element, keeping the order of the others
//! 5. insert `n` more elements
//! 6. walk the container, mutating every element
//!
//! `Vec` wins on raw speed but cannot keep element addresses stable across removals;
//! `LinkedList` is the structure with comparable guarantees.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{HashMap, LinkedList, VecDeque};
use std::hint::black_box;

use chunked_heap::{ChunkedHeap, PlannedSizer};

#[derive(Clone, Copy)]
struct Payload {
    key: u32,
    weight: f64,
    #[allow(dead_code)]
    spare: f64,
}

impl Payload {
    fn new(key: u32) -> Self {
        Self {
            key,
            weight: 3.5,
            spare: 0.0,
        }
    }
}

fn chunked_heap_scenario(n: u32) -> ChunkedHeap<Payload, PlannedSizer<300_000, 8>> {
    let mut heap = ChunkedHeap::default();
    for key in 0..n {
        heap.emplace(Payload::new(key));
    }
    let remembered = heap.emplace(Payload::new(42));
    for key in n..2 * n {
        heap.emplace(Payload::new(key));
    }
    heap.erase(remembered);
    for key in 2 * n..3 * n {
        heap.emplace(Payload::new(key));
    }
    for payload in heap.iter_mut() {
        payload.key += 1;
        payload.weight *= 2.0;
    }
    heap
}

fn vec_scenario(n: u32) -> Vec<Payload> {
    let mut vec = Vec::with_capacity(3 * n as usize + 1);
    for key in 0..n {
        vec.push(Payload::new(key));
    }
    let remembered = vec.len();
    vec.push(Payload::new(42));
    for key in n..2 * n {
        vec.push(Payload::new(key));
    }
    vec.swap_remove(remembered);
    for key in 2 * n..3 * n {
        vec.push(Payload::new(key));
    }
    for payload in vec.iter_mut() {
        payload.key += 1;
        payload.weight *= 2.0;
    }
    vec
}

fn hash_map_scenario(n: u32) -> HashMap<u32, Payload> {
    let mut map = HashMap::new();
    for key in 0..n {
        map.insert(key, Payload::new(key));
    }
    map.insert(u32::MAX, Payload::new(u32::MAX));
    for key in n..2 * n {
        map.insert(key, Payload::new(key));
    }
    map.remove(&u32::MAX);
    for key in 2 * n..3 * n {
        map.insert(key, Payload::new(key));
    }
    for payload in map.values_mut() {
        payload.key += 1;
        payload.weight *= 2.0;
    }
    map
}

fn linked_list_scenario(n: u32) -> LinkedList<Payload> {
    let mut front = LinkedList::new();
    for key in 0..n {
        front.push_back(Payload::new(key));
    }
    front.push_back(Payload::new(42));
    let mut back = LinkedList::new();
    for key in n..2 * n {
        back.push_back(Payload::new(key));
    }
    front.pop_back();
    front.append(&mut back);
    for key in 2 * n..3 * n {
        front.push_back(Payload::new(key));
    }
    for payload in front.iter_mut() {
        payload.key += 1;
        payload.weight *= 2.0;
    }
    front
}

fn vec_deque_scenario(n: u32) -> VecDeque<Payload> {
    let mut deque = VecDeque::new();
    for key in 0..n {
        deque.push_back(Payload::new(key));
    }
    let remembered = deque.len();
    deque.push_back(Payload::new(42));
    for key in n..2 * n {
        deque.push_back(Payload::new(key));
    }
    deque.remove(remembered);
    for key in 2 * n..3 * n {
        deque.push_back(Payload::new(key));
    }
    for payload in deque.iter_mut() {
        payload.key += 1;
        payload.weight *= 2.0;
    }
    deque
}

fn benchmark_scenario(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_erase_iterate");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("ChunkedHeap", size),
            &size,
            |bencher, &size| bencher.iter(|| black_box(chunked_heap_scenario(black_box(size)))),
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| black_box(vec_scenario(black_box(size))))
        });

        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| bencher.iter(|| black_box(hash_map_scenario(black_box(size)))),
        );

        group.bench_with_input(
            BenchmarkId::new("LinkedList", size),
            &size,
            |bencher, &size| bencher.iter(|| black_box(linked_list_scenario(black_box(size)))),
        );

        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &size,
            |bencher, &size| bencher.iter(|| black_box(vec_deque_scenario(black_box(size)))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_scenario);
criterion_main!(benches);
