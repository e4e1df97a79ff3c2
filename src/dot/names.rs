//! Stable node and cluster identifiers for one rendered document.

/// Allocates DOT identifiers for blocks and region clusters.
///
/// Block names reuse the numeric block id, which is unique within a method.
/// Cluster names come from a per-document sequential counter, so every region
/// instance in one document gets a distinct name regardless of how the region
/// tree shares descriptions.
#[derive(Debug, Default)]
pub struct NameAllocator {
    next_cluster: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, id: u32) -> String {
        format!("Node_{id}")
    }

    pub fn next_cluster(&mut self) -> String {
        let name = format!("cluster_{}", self.next_cluster);
        self.next_cluster += 1;
        name
    }
}
