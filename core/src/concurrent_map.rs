//! Sharded map for accumulating values from many threads at once.
//!
//! Keys are integers routed to `key % bucket_count`; each bucket is an ordered map behind its
//! own mutex, so writers touching different buckets never contend.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Integer keys that can be routed to a bucket.
pub trait BucketKey: Copy + Ord {
    fn route(self) -> u64;
}

macro_rules! impl_bucket_key {
    ($($t:ty),*) => {
        $(impl BucketKey for $t {
            #[inline]
            fn route(self) -> u64 { self as u64 }
        })*
    };
}

impl_bucket_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Locked handle to one value. The owning bucket stays locked until the handle is dropped.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: BucketKey, V> ConcurrentMap<K, V> {
    /// Panics if `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be non-zero");
        let buckets = (0..bucket_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { buckets }
    }

    pub fn bucket_count(&self) -> usize { self.buckets.len() }

    fn bucket(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        let idx = key.route() % self.buckets.len() as u64;
        &self.buckets[idx as usize]
    }

    /// Lock the key's bucket and return its value, inserting `V::default()` if absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.bucket(key).lock(), |map| map.entry(key).or_default())
    }

    pub fn erase(&self, key: K) {
        self.bucket(key).lock().remove(&key);
    }

    /// Merge all buckets into one ordered map. Buckets are locked one at a time, so the result is
    /// only a consistent snapshot once every writer has finished.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for bucket in &self.buckets {
            let guard = bucket.lock();
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }
}
