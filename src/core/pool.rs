//! Free list of root entries, one per logger

use super::entry::Entry;
use parking_lot::Mutex;

/// Upper bound on idle entries kept for reuse
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Entries are reset before they go back on the list, so nothing from a
/// previous owner survives into the next acquisition.
#[derive(Debug)]
pub struct EntryPool {
    free: Mutex<Vec<Entry>>,
    capacity: usize,
}

impl EntryPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// An idle entry, or a fresh one when the list is empty
    pub fn acquire(&self) -> Entry {
        self.free.lock().pop().unwrap_or_default()
    }

    pub fn release(&self, mut entry: Entry) {
        entry.reset();

        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(entry);
        }
    }

    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for EntryPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_resets_and_caps() {
        let pool = EntryPool::new(1);

        pool.release(Entry::default().with_field("secret", "x"));
        pool.release(Entry::default());
        assert_eq!(pool.idle(), 1);

        let reused = pool.acquire();
        assert!(reused.fields().is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_acquire_from_empty_pool() {
        let pool = EntryPool::default();
        assert!(pool.acquire().fields().is_empty());
    }
}
