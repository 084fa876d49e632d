use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ArborescenceError {
    /// Some vertex has no directed path from the root. `vertex` is an index in the caller's
    /// graph; when a whole contracted cycle is cut off, one of its members is reported.
    #[error("vertex {vertex} is unreachable from the root")]
    Unreachable { vertex: usize },
    #[error("graph must have at least one vertex")]
    EmptyGraph,
    #[error("root {root} is out of range for a graph with {vertex_count} vertices")]
    RootOutOfRange { root: usize, vertex_count: usize },
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    #[error("arborescence weight does not fit in i64")]
    WeightOverflow,
}

impl ArborescenceError {
    /// `true` for the one outcome that is a property of the graph rather than a misuse of
    /// the API.
    #[inline]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}
