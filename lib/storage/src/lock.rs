//! Per-path mutual exclusion within one process
//!
//! Other processes are not coordinated; concurrent writers from separate
//! processes can still interleave.

use crate::target::dataset_family;
use ahash::AHashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Registry handing out one mutex per dataset path
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    locks: Arc<Mutex<AHashMap<PathBuf, Arc<Mutex<()>>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `path`
    ///
    /// Paths are keyed by their absolute dataset family, so `data.csv`,
    /// `./data.csv` and a stamped `data_<stamp>.csv` share a lock. Entries
    /// nobody holds are pruned.
    pub fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let key = lock_key(path);
        let mut locks = self.locks.lock();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(key).or_default().clone()
    }

    /// Number of paths currently tracked
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_key(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return dataset_family(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => dataset_family(&cwd.join(path)),
        Err(_) => dataset_family(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_same_lock() {
        let locks = PathLocks::new();
        let a = locks.lock_for(Path::new("data.csv"));
        let b = locks.lock_for(Path::new("./data.csv"));
        assert!(Arc::ptr_eq(&a, &b));

        let c = locks.lock_for(Path::new("other.csv"));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_stamped_sibling_shares_lock() {
        let locks = PathLocks::new();
        let requested = locks.lock_for(Path::new("dataset.csv"));
        let stamped = locks.lock_for(Path::new("dataset_20260107T121314Z.csv"));
        let bare = locks.lock_for(Path::new("dataset"));
        assert!(Arc::ptr_eq(&requested, &stamped));
        assert!(Arc::ptr_eq(&requested, &bare));

        let _guard = requested.lock();
        assert!(stamped.try_lock().is_none());
    }

    #[test]
    fn test_unused_entries_are_pruned() {
        let locks = PathLocks::new();
        {
            let _held = locks.lock_for(Path::new("a.csv"));
            let _also = locks.lock_for(Path::new("b.csv"));
            assert_eq!(locks.len(), 2);
        }
        let _c = locks.lock_for(Path::new("c.csv"));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn test_lock_excludes() {
        let locks = PathLocks::new();
        let lock = locks.lock_for(Path::new("x.csv"));
        let _guard = lock.lock();
        let same = locks.lock_for(Path::new("x.csv"));
        assert!(same.try_lock().is_none());
    }
}
