use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::{KeyValueStore, KvError, MemoryStore};

/// Wraps a [`MemoryStore`] and fails on demand.
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    failing_writes: AtomicU32,
    fail_all_writes: AtomicBool,
    fail_reads: AtomicBool,
    delayed_read_failure: AtomicBool,
    reads_before_failure: AtomicU32,
    write_attempts: AtomicU32,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The next `count` writes (set or remove) fail.
    pub(crate) fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    pub(crate) fn fail_all_writes(&self, fail: bool) {
        self.fail_all_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// The next `count` reads succeed, every read after them fails.
    pub(crate) fn fail_reads_after(&self, count: u32) {
        self.reads_before_failure.store(count, Ordering::SeqCst);
        self.delayed_read_failure.store(true, Ordering::SeqCst);
    }

    pub(crate) fn write_attempts(&self) -> u32 {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), KvError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all_writes.load(Ordering::SeqCst) {
            return Err(KvError::Backend("storage unavailable".to_string()));
        }
        let remaining = self.failing_writes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_writes.store(remaining - 1, Ordering::SeqCst);
            return Err(KvError::Backend("transient write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KvError::Backend("read failure".to_string()));
        }
        if self.delayed_read_failure.load(Ordering::SeqCst) {
            let remaining = self.reads_before_failure.load(Ordering::SeqCst);
            if remaining == 0 {
                return Err(KvError::Backend("read failure".to_string()));
            }
            self.reads_before_failure.store(remaining - 1, Ordering::SeqCst);
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.check_write()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        self.check_write()?;
        self.inner.remove(key).await
    }
}
