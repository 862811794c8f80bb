use narwhal_graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] narwhal_graph::Error),
    /// Ranks kept growing past the number of visible nodes. Only a cycle that does not pass
    /// through a loop header (or a phi hanging off one) can do that.
    #[error("rank of node {id} reached {rank}, more than the {limit} visible nodes; cycle outside a loop header?")]
    RankOverflow { id: NodeId, rank: u32, limit: u32 },
    #[error("node {id} is not reachable from any visible source")]
    UnrankedNode { id: NodeId },
}
