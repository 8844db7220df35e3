use std::collections::VecDeque;

use beacon_core::IceCandidate;

/// Holds remote ICE candidates that arrived before a remote description was
/// applied. Candidates routinely beat the description over the relay, and
/// handing one to the peer-connection engine too early is an error there,
/// so buffering is mandatory rather than an optimization.
#[derive(Debug, Default)]
pub struct CandidateBuffer {
    queue: VecDeque<IceCandidate>,
}

impl CandidateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, candidate: IceCandidate) {
        self.queue.push_back(candidate);
    }

    /// Returns nothing and leaves the buffer untouched until a remote
    /// description is in place; after that, returns everything in arrival
    /// order and empties the buffer in the same step.
    pub fn drain_if_ready(&mut self, remote_description_applied: bool) -> Vec<IceCandidate> {
        if !remote_description_applied {
            return Vec::new();
        }
        self.queue.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
