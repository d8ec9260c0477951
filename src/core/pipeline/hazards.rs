//! Data hazard detection.
//!
//! This pipeline has no forwarding network: a RAW hazard stalls the consumer
//! in ID until the producer's write retires at WB. The only cross-stage
//! shared structure is the per-register write-pending vector below, set at ID
//! when an instruction issues with a destination and cleared at WB when the
//! write retires.

use crate::isa::reg;

/// Per-register write-pending bits.
///
/// `pending(r)` is true iff some in-flight instruction past ID and not yet
/// past WB holds r as its hazard destination.
#[derive(Debug, Default)]
pub struct PendingWrites([bool; reg::COUNT]);

impl PendingWrites {
    pub fn new() -> Self {
        PendingWrites([false; reg::COUNT])
    }

    /// Marks r write-pending. Register 0 is never marked.
    pub fn set(&mut self, r: usize) {
        if r != reg::ZERO {
            self.0[r] = true;
        }
    }

    /// Releases r when the owning instruction retires at WB.
    pub fn clear(&mut self, r: usize) {
        self.0[r] = false;
    }

    pub fn pending(&self, r: usize) -> bool {
        self.0[r]
    }

    /// True if any of the given source registers has a write in flight.
    pub fn any(&self, sources: &[usize]) -> bool {
        sources.iter().any(|&r| self.0[r])
    }
}
