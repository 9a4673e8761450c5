use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use loancalc_core::error::Result;

use super::HitCounter;

/// Process-local counter. Same contract as the Redis one within a single
/// process; two instances each get their own sequence.
#[derive(Debug, Default)]
pub struct MemoryHitCounter {
    value: AtomicI64,
}

impl MemoryHitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing value; the next call returns `start + 1`.
    pub fn starting_at(start: i64) -> Self {
        Self {
            value: AtomicI64::new(start),
        }
    }
}

#[async_trait]
impl HitCounter for MemoryHitCounter {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get_and_increment(&self) -> Result<i64> {
        Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
