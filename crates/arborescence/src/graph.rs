use crate::error::ArborescenceError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub from: u32,
    pub to: u32,
    pub weight: i64,
}

impl Edge {
    #[inline]
    pub const fn new(from: u32, to: u32, weight: i64) -> Self {
        Self { from, to, weight }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Directed multigraph stored as an unordered edge list.
///
/// Parallel edges and self-loops are kept as given. Every endpoint is checked against the
/// vertex count on insertion, so a constructed graph never holds a dangling edge.
#[derive(Clone, Debug)]
pub struct DirectedGraph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl DirectedGraph {
    pub fn new(vertex_count: usize) -> Result<Self, ArborescenceError> {
        if vertex_count == 0 {
            return Err(ArborescenceError::EmptyGraph);
        }
        Ok(Self {
            vertex_count,
            edges: Vec::new(),
        })
    }

    pub fn from_edges(
        vertex_count: usize,
        edges: &[(u32, u32, i64)],
    ) -> Result<Self, ArborescenceError> {
        let mut graph = Self::new(vertex_count)?;
        graph.edges.reserve_exact(edges.len());
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    pub fn add_edge(&mut self, from: u32, to: u32, weight: i64) -> Result<(), ArborescenceError> {
        self.check_vertex(from as usize)?;
        self.check_vertex(to as usize)?;
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<(), ArborescenceError> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(ArborescenceError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_keeps_input_order() {
        let g = DirectedGraph::from_edges(3, &[(0, 1, 4), (1, 1, -2), (0, 1, 4), (2, 0, 0)])
            .unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.edges()[1], Edge::new(1, 1, -2));
        assert!(g.edges()[1].is_self_loop());
        assert_eq!(g.edges()[0], g.edges()[2]);
    }

    #[test]
    fn rejects_empty_graph() {
        assert_eq!(
            DirectedGraph::new(0).unwrap_err(),
            ArborescenceError::EmptyGraph
        );
        assert_eq!(
            DirectedGraph::from_edges(0, &[]).unwrap_err(),
            ArborescenceError::EmptyGraph
        );
    }

    #[test]
    fn rejects_out_of_range_endpoints() {
        let err = DirectedGraph::from_edges(3, &[(0, 1, 1), (1, 3, 1)]).unwrap_err();
        assert_eq!(
            err,
            ArborescenceError::VertexOutOfRange {
                vertex: 3,
                vertex_count: 3
            }
        );

        let mut g = DirectedGraph::new(2).unwrap();
        assert!(g.add_edge(5, 0, 1).is_err());
        assert_eq!(g.edge_count(), 0);
    }
}
