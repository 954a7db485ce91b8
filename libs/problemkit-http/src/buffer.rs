//! Reusable output buffers for formatter writes
//!
//! The pool is opaque to the formatters: checkout hands out a cleared buffer,
//! drop returns it. Concurrent checkout/return from multiple requests is safe;
//! the pool never blocks beyond the mutex guarding the idle list.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::Mutex;

const DEFAULT_BUF_CAPACITY: usize = 1024;
const DEFAULT_MAX_IDLE: usize = 16;

/// A pool of reusable byte buffers for serializing response bodies.
pub struct BufPool {
    idle: Mutex<Vec<Vec<u8>>>,
    buf_capacity: usize,
    max_idle: usize,
}

impl BufPool {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_capacity(DEFAULT_BUF_CAPACITY, DEFAULT_MAX_IDLE)
    }

    /// Create a pool handing out buffers with the given initial capacity,
    /// retaining at most `max_idle` returned buffers.
    #[must_use]
    pub fn with_capacity(buf_capacity: usize, max_idle: usize) -> Arc<Self> {
        Arc::new(Self {
            idle: Mutex::new(Vec::new()),
            buf_capacity,
            max_idle,
        })
    }

    /// Check out an empty buffer; it returns to the pool on drop.
    pub fn checkout(self: &Arc<Self>) -> PooledBuf {
        let buf = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.buf_capacity));
        PooledBuf {
            buf,
            pool: Arc::clone(self),
        }
    }

    /// Number of buffers currently sitting idle in the pool.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }
}

/// A buffer checked out of a [`BufPool`]; dereferences to `Vec<u8>`.
pub struct PooledBuf {
    buf: Vec<u8>,
    pool: Arc<BufPool>,
}

impl Deref for PooledBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let mut idle = self.pool.idle.lock();
        if idle.len() < self.pool.max_idle {
            idle.push(buf);
        }
    }
}
