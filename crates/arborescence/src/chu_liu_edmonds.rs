use log::{debug, trace};

use crate::error::ArborescenceError;
use crate::graph::{DirectedGraph, Edge};

/// Result of a successful solve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Total weight of a minimum spanning arborescence.
    pub weight: i64,
    /// Number of cycle contraction rounds that ran before the selection became acyclic.
    pub contractions: usize,
}

/// Weight of a minimum spanning arborescence of `graph` rooted at `root`.
///
/// Chu-Liu-Edmonds contraction, `O(V * E)`. The graph is only borrowed; the solver works on
/// its own copy of the edge list. Among equal-weight incoming edges the first one in edge-list
/// order is selected. This only affects which edges are chosen internally, never the total.
pub fn min_arborescence_weight(
    graph: &DirectedGraph,
    root: usize,
) -> Result<i64, ArborescenceError> {
    solve_with_stats(graph, root).map(|solution| solution.weight)
}

pub fn solve_with_stats(
    graph: &DirectedGraph,
    root: usize,
) -> Result<Solution, ArborescenceError> {
    let vertex_count = graph.vertex_count();
    if root >= vertex_count {
        return Err(ArborescenceError::RootOutOfRange { root, vertex_count });
    }
    run(Snapshot::new(vertex_count, root, graph.edges()))
}

/// Same as [`min_arborescence_weight`] on a raw edge slice, validated up front.
pub fn chu_liu_edmonds(
    vertex_count: usize,
    root: usize,
    edges: &[Edge],
) -> Result<i64, ArborescenceError> {
    if vertex_count == 0 {
        return Err(ArborescenceError::EmptyGraph);
    }
    if root >= vertex_count {
        return Err(ArborescenceError::RootOutOfRange { root, vertex_count });
    }
    for edge in edges {
        for vertex in [edge.from as usize, edge.to as usize] {
            if vertex >= vertex_count {
                return Err(ArborescenceError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }
    }
    run(Snapshot::new(vertex_count, root, edges)).map(|solution| solution.weight)
}

fn run(mut snapshot: Snapshot) -> Result<Solution, ArborescenceError> {
    let mut total = 0_i128;
    let mut contractions = 0_usize;

    loop {
        match snapshot.round()? {
            Round::Acyclic { contribution } => {
                total += contribution;
                debug!("selection is acyclic after {contractions} contractions, total {total}");
                let weight = i64::try_from(total).map_err(|_| ArborescenceError::WeightOverflow)?;
                return Ok(Solution {
                    weight,
                    contractions,
                });
            }
            Round::Contracted { contribution, next } => {
                total += contribution;
                contractions += 1;
                snapshot = next;
            }
        }
    }
}

/// Edge of a snapshot. Weights are widened so that repeated discounting cannot overflow.
#[derive(Clone, Copy, Debug)]
struct ReducedEdge {
    from: u32,
    to: u32,
    weight: i128,
}

/// One level of the contraction: the graph the current round works on.
struct Snapshot {
    vertex_count: usize,
    root: usize,
    edges: Vec<ReducedEdge>,
    // One input vertex per current vertex, used to name unreachable vertices.
    representative: Vec<usize>,
}

enum Round {
    Acyclic { contribution: i128 },
    Contracted { contribution: i128, next: Snapshot },
}

struct Cycles {
    cycle_of: Vec<Option<usize>>,
    sizes: Vec<usize>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mark {
    Unvisited,
    OnChain,
    Settled,
}

impl Snapshot {
    fn new(vertex_count: usize, root: usize, edges: &[Edge]) -> Self {
        let edges = edges
            .iter()
            .map(|edge| ReducedEdge {
                from: edge.from,
                to: edge.to,
                weight: i128::from(edge.weight),
            })
            .collect();
        Self {
            vertex_count,
            root,
            edges,
            representative: (0..vertex_count).collect(),
        }
    }

    fn round(&self) -> Result<Round, ArborescenceError> {
        let selection = self.select_min_incoming()?;

        let mut parent = vec![self.root; self.vertex_count];
        for (v, chosen) in selection.iter().enumerate() {
            if let Some(edge) = chosen {
                parent[v] = edge.from as usize;
            }
        }
        let cycles = find_cycles(self.root, &parent);

        let contribution: i128 = selection.iter().flatten().map(|edge| edge.weight).sum();
        debug!(
            "round on {} vertices / {} edges: {} cycles, contribution {}",
            self.vertex_count,
            self.edges.len(),
            cycles.sizes.len(),
            contribution
        );

        if cycles.sizes.is_empty() {
            return Ok(Round::Acyclic { contribution });
        }
        Ok(Round::Contracted {
            contribution,
            next: self.contract(&selection, &cycles),
        })
    }

    /// Cheapest non-loop incoming edge of every non-root vertex, first-seen on ties.
    fn select_min_incoming(&self) -> Result<Vec<Option<ReducedEdge>>, ArborescenceError> {
        let mut best: Vec<Option<ReducedEdge>> = vec![None; self.vertex_count];
        for edge in &self.edges {
            if edge.from == edge.to || edge.to as usize == self.root {
                continue;
            }
            let slot = &mut best[edge.to as usize];
            if slot.is_none_or(|current| edge.weight < current.weight) {
                *slot = Some(*edge);
            }
        }

        if let Some(v) = (0..self.vertex_count).find(|&v| v != self.root && best[v].is_none()) {
            return Err(ArborescenceError::Unreachable {
                vertex: self.representative[v],
            });
        }
        Ok(best)
    }

    fn contract(&self, selection: &[Option<ReducedEdge>], cycles: &Cycles) -> Snapshot {
        let mut cycle_label: Vec<Option<u32>> = vec![None; cycles.sizes.len()];
        let mut relabel = vec![0_u32; self.vertex_count];
        let mut representative = Vec::with_capacity(self.vertex_count);

        for v in 0..self.vertex_count {
            let label = match cycles.cycle_of[v] {
                Some(id) => match cycle_label[id] {
                    Some(label) => label,
                    None => {
                        let label = representative.len() as u32;
                        trace!(
                            "cycle {id} of {} vertices becomes vertex {label}",
                            cycles.sizes[id]
                        );
                        cycle_label[id] = Some(label);
                        representative.push(self.representative[v]);
                        label
                    }
                },
                None => {
                    representative.push(self.representative[v]);
                    (representative.len() - 1) as u32
                }
            };
            relabel[v] = label;
        }

        // Entering v from outside replaces v's selected edge, so only the difference counts.
        let edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                let from = relabel[edge.from as usize];
                let to = relabel[edge.to as usize];
                if from == to {
                    return None;
                }
                let discount = selection[edge.to as usize].map_or(0, |chosen| chosen.weight);
                Some(ReducedEdge {
                    from,
                    to,
                    weight: edge.weight - discount,
                })
            })
            .collect();

        Snapshot {
            vertex_count: representative.len(),
            root: relabel[self.root] as usize,
            edges,
            representative,
        }
    }
}

/// Walks selected-parent chains from every vertex. A chain stops at a settled vertex (the
/// root is settled from the start) or at a vertex already on the current chain, which closes
/// a new cycle. Each vertex is put on a chain at most once.
fn find_cycles(root: usize, parent: &[usize]) -> Cycles {
    let n = parent.len();
    let mut mark = vec![Mark::Unvisited; n];
    let mut cycle_of = vec![None; n];
    let mut sizes = Vec::new();
    mark[root] = Mark::Settled;

    for start in 0..n {
        if mark[start] != Mark::Unvisited {
            continue;
        }

        let mut v = start;
        while mark[v] == Mark::Unvisited {
            mark[v] = Mark::OnChain;
            v = parent[v];
        }

        if mark[v] == Mark::OnChain {
            let id = sizes.len();
            let mut size = 0;
            let mut u = v;
            loop {
                cycle_of[u] = Some(id);
                size += 1;
                u = parent[u];
                if u == v {
                    break;
                }
            }
            sizes.push(size);
        }

        let mut u = start;
        while mark[u] == Mark::OnChain {
            mark[u] = Mark::Settled;
            u = parent[u];
        }
    }

    Cycles { cycle_of, sizes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_cycles_separates_cycles_from_tails() {
        // 0 is the root; 1 <-> 2 is a cycle with 3 hanging off it; 4 -> 5 -> 6 -> 4 is another.
        let parent = [0, 2, 1, 2, 6, 4, 5];
        let cycles = find_cycles(0, &parent);
        assert_eq!(cycles.sizes, vec![2, 3]);
        assert_eq!(cycles.cycle_of[0], None);
        assert_eq!(cycles.cycle_of[1], cycles.cycle_of[2]);
        assert_eq!(cycles.cycle_of[3], None);
        assert_eq!(cycles.cycle_of[4], Some(1));
        assert_eq!(cycles.cycle_of[5], Some(1));
        assert_eq!(cycles.cycle_of[6], Some(1));
    }

    #[test]
    fn find_cycles_on_tree_is_empty() {
        let parent = [0, 0, 1, 1, 3];
        let cycles = find_cycles(0, &parent);
        assert!(cycles.sizes.is_empty());
        assert!(cycles.cycle_of.iter().all(Option::is_none));
    }

    #[test]
    fn selection_ignores_self_loops_and_keeps_first_tie() {
        let edges = [
            Edge::new(1, 1, -100),
            Edge::new(0, 1, 7),
            Edge::new(2, 1, 7),
            Edge::new(0, 2, 3),
        ];
        let snapshot = Snapshot::new(3, 0, &edges);
        let selection = snapshot.select_min_incoming().unwrap();
        assert!(selection[0].is_none());
        let chosen = selection[1].unwrap();
        assert_eq!((chosen.from, chosen.weight), (0, 7));
        assert_eq!(selection[2].unwrap().weight, 3);
    }

    #[test]
    fn contraction_discounts_edges_entering_a_cycle() {
        // Cycle 1 <-> 2 (weights 20 and 5); root reaches it through 0 -> 1 (10).
        let edges = [Edge::new(0, 1, 10), Edge::new(1, 2, 20), Edge::new(2, 1, 5)];
        let snapshot = Snapshot::new(3, 0, &edges);
        let Round::Contracted { contribution, next } = snapshot.round().unwrap() else {
            panic!("expected a contraction");
        };
        assert_eq!(contribution, 25);
        assert_eq!(next.vertex_count, 2);
        assert_eq!(next.root, 0);
        assert_eq!(next.edges.len(), 1);
        assert_eq!(next.edges[0].weight, 10 - 5);
        assert_eq!(next.representative, vec![0, 1]);
    }

    #[test]
    fn unreachable_cycle_is_reported_by_input_vertex() {
        // 3 <-> 4 has no edge from the rest of the graph.
        let g = DirectedGraph::from_edges(5, &[(0, 1, 1), (1, 2, 1), (3, 4, 1), (4, 3, 1)])
            .unwrap();
        let err = min_arborescence_weight(&g, 0).unwrap_err();
        assert_eq!(err, ArborescenceError::Unreachable { vertex: 3 });
    }

    #[test]
    fn extreme_weights_overflow_only_the_final_total() {
        let g = DirectedGraph::from_edges(3, &[(0, 1, i64::MAX), (0, 2, i64::MAX)]).unwrap();
        assert_eq!(
            min_arborescence_weight(&g, 0).unwrap_err(),
            ArborescenceError::WeightOverflow
        );

        let g = DirectedGraph::from_edges(
            3,
            &[(0, 1, i64::MAX), (1, 2, i64::MIN), (2, 1, i64::MIN), (0, 2, i64::MAX)],
        )
        .unwrap();
        assert_eq!(min_arborescence_weight(&g, 0), Ok(-1));
    }
}
