//! Bounded free list of scratch buffers.
//!
//! Column tasks of the general 2D transform run concurrently on the rayon
//! pool; each one borrows a buffer to gather its strided column into and
//! hands it back when the guard drops. The free list is a bounded
//! crossbeam channel, so borrow and return are lock-free and a full list
//! simply drops the surplus buffer.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

/// Thread-safe pool of reusable `f64` buffers
pub struct ScratchPool {
    sender: Sender<Vec<f64>>,
    receiver: Receiver<Vec<f64>>,
}

impl ScratchPool {
    /// Create a pool that retains at most `capacity` idle buffers
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Borrow a zeroed buffer of exactly `len` values.
    ///
    /// Reuses an idle buffer when one is available, otherwise allocates.
    pub fn borrow(&self, len: usize) -> ScratchBuffer<'_> {
        let mut buffer = self.receiver.try_recv().unwrap_or_default();
        buffer.clear();
        buffer.resize(len, 0.0);
        ScratchBuffer { buffer, pool: self }
    }

    /// Number of buffers currently waiting to be reused
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    /// Maximum number of idle buffers kept
    pub fn capacity(&self) -> usize {
        self.sender.capacity().unwrap_or(0)
    }

    fn give_back(&self, buffer: Vec<f64>) {
        // A full free list means enough buffers are cached already.
        let _ = self.sender.try_send(buffer);
    }
}

/// Process-wide pool used by the general DCT column pass
pub fn shared() -> &'static ScratchPool {
    static POOL: OnceLock<ScratchPool> = OnceLock::new();
    POOL.get_or_init(|| ScratchPool::new(rayon::current_num_threads() * 2))
}

/// A borrowed buffer that returns itself to its pool on drop
pub struct ScratchBuffer<'a> {
    buffer: Vec<f64>,
    pool: &'a ScratchPool,
}

impl Deref for ScratchBuffer<'_> {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.buffer
    }
}

impl DerefMut for ScratchBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buffer));
    }
}
