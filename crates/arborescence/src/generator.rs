use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::DirectedGraph;

const W_MAX: i64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GraphCase {
    SparseRandom,
    DenseRandom,
    MixedSign,
    CycleRing,
    HierarchicalCycles,
}

impl GraphCase {
    pub const ALL: [GraphCase; 5] = [
        Self::SparseRandom,
        Self::DenseRandom,
        Self::MixedSign,
        Self::CycleRing,
        Self::HierarchicalCycles,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SparseRandom => "sparse_random",
            Self::DenseRandom => "dense_random",
            Self::MixedSign => "mixed_sign",
            Self::CycleRing => "cycle_ring",
            Self::HierarchicalCycles => "hierarchical_cycles",
        }
    }
}

/// A generated instance. Every case embeds a spanning structure out of `root`, so an
/// arborescence always exists.
#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    pub graph: DirectedGraph,
    pub root: usize,
}

pub fn generate_case(case: GraphCase, size: usize, seed: u64) -> GeneratedGraph {
    match case {
        GraphCase::SparseRandom => sparse_random_case(size.max(16), seed, 0..=W_MAX),
        GraphCase::DenseRandom => dense_random_case(size.max(64), seed),
        GraphCase::MixedSign => sparse_random_case(size.max(16), seed ^ 0x5A5A, -W_MAX..=W_MAX),
        GraphCase::CycleRing => cycle_ring_case(size.max(8), seed),
        GraphCase::HierarchicalCycles => hierarchical_cycles_case(size.max(8), seed),
    }
}

fn sparse_random_case(
    size: usize,
    seed: u64,
    weights: std::ops::RangeInclusive<i64>,
) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = size;
    let mut edges = Vec::with_capacity(n * 5);

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    for pair in order.windows(2) {
        edges.push((pair[0] as u32, pair[1] as u32, rng.random_range(weights.clone())));
    }

    while edges.len() < n * 5 {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u == v {
            continue;
        }
        edges.push((u as u32, v as u32, rng.random_range(weights.clone())));
    }

    edges.shuffle(&mut rng);
    finish(n, order[0], &edges)
}

fn dense_random_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(n * (n - 1));

    for u in 0..n {
        for v in 0..n {
            if u != v {
                edges.push((u as u32, v as u32, rng.random_range(0..=W_MAX)));
            }
        }
    }

    let root = rng.random_range(0..n);
    finish(n, root, &edges)
}

fn cycle_ring_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = size;
    let mut edges = Vec::with_capacity(2 * n);

    // Ring over 1..n with cheap edges; the root only offers expensive ones.
    for v in 1..n {
        let next = if v + 1 == n { 1 } else { v + 1 };
        edges.push((v as u32, next as u32, rng.random_range(0..=10)));
        edges.push((0, v as u32, rng.random_range(W_MAX / 2..=W_MAX)));
    }

    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0 as usize] as u32;
        edge.1 = perm[edge.1 as usize] as u32;
    }
    edges.shuffle(&mut rng);
    finish(n, perm[0], &edges)
}

/// Pairs of blocks of size `2^level` are joined by a 2-cycle whose weight grows with the
/// level, so every contraction round exposes the next level of cycles.
fn hierarchical_cycles_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let leaves = size.next_power_of_two() / 2;
    let n = leaves + 1;
    let mut edges = Vec::new();

    let mut block = 1;
    let mut level_weight = 1_i64;
    while block < leaves {
        for start in (0..leaves).step_by(2 * block) {
            let a = 1 + start;
            let b = 1 + start + block;
            edges.push((a as u32, b as u32, level_weight + rng.random_range(0..=1)));
            edges.push((b as u32, a as u32, level_weight + rng.random_range(0..=1)));
        }
        block *= 2;
        level_weight *= 4;
    }
    for v in 1..n {
        edges.push((0, v as u32, W_MAX + rng.random_range(0..=W_MAX)));
    }

    edges.shuffle(&mut rng);
    finish(n, 0, &edges)
}

fn finish(n: usize, root: usize, edges: &[(u32, u32, i64)]) -> GeneratedGraph {
    let graph = match DirectedGraph::from_edges(n, edges) {
        Ok(graph) => graph,
        Err(err) => unreachable!("generator produced an invalid graph: {err}"),
    };
    GeneratedGraph { graph, root }
}

#[inline]
fn floor_sqrt(value: usize) -> usize {
    (value as f64).sqrt().floor() as usize
}
