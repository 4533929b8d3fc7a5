//! 共享完美哈希表 - 单写多读
//!
//! 一次插入(搜索种子、分配、填充、切换描述符、释放旧区域)整体在写锁内完成，
//! 读者只会看到插入前或插入后的完整区域。

use crate::{
    error::PerfectHashError,
    hash::{DefaultHashFamily, HashFamily},
    map::perfect_map::{PerfectHashMap, PerfectHashMapConfig, PerfectHashMapStats},
    types::{Key, Value},
};
use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;
use std::sync::Arc;

pub struct SharedPerfectHashMap<K: Key, V: Value, H: HashFamily = DefaultHashFamily> {
    inner: Arc<RwLock<PerfectHashMap<K, V, H>>>,
}

impl<K: Key, V: Value, H: HashFamily> Clone for SharedPerfectHashMap<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Key, V: Value> SharedPerfectHashMap<K, V, DefaultHashFamily> {
    pub fn new(capacity_hint: usize) -> Self {
        Self::from_map(PerfectHashMap::new(capacity_hint))
    }
}

impl<K: Key, V: Value, H: HashFamily> SharedPerfectHashMap<K, V, H> {
    pub fn with_config(config: PerfectHashMapConfig, family: H) -> Result<Self, PerfectHashError> {
        PerfectHashMap::with_config(config, family).map(Self::from_map)
    }

    pub fn from_map(map: PerfectHashMap<K, V, H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// 插入键值对（独占写锁）
    pub fn insert(&self, key: K, value: V) -> Result<(), PerfectHashError> {
        self.inner.write().insert(key, value)
    }

    /// 在同一把写锁内批量插入，返回成功数量
    pub fn insert_batch(&self, items: impl IntoIterator<Item = (K, V)>) -> usize {
        let mut map = self.inner.write();
        items
            .into_iter()
            .filter_map(|(key, value)| map.insert(key, value).ok())
            .count()
    }

    pub fn update(&self, key: K, value: V) -> Result<V, PerfectHashError> {
        self.inner.write().update(key, value)
    }

    pub fn lookup(&self, key: K) -> Option<V> {
        self.inner.read().lookup(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// 在一把读锁下并行查询
    pub fn lookup_batch(&self, keys: &[K]) -> Vec<Option<V>> {
        let guard = self.inner.read();
        let map: &PerfectHashMap<K, V, H> = &guard;
        keys.par_iter().map(|&key| map.lookup(key)).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> PerfectHashMapStats {
        self.inner.read().stats()
    }

    pub fn check_invariants(&self) -> Result<(), PerfectHashError> {
        self.inner.read().check_invariants()
    }

    /// 获取读锁，便于连续多次访问
    pub fn read(&self) -> RwLockReadGuard<'_, PerfectHashMap<K, V, H>> {
        self.inner.read()
    }

    /// 取回内部表；仍有其他克隆存在时原样返回
    pub fn try_unwrap(self) -> Result<PerfectHashMap<K, V, H>, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner())
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::ModularHashFamily;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let map: SharedPerfectHashMap<u32, u32> = SharedPerfectHashMap::new(64);
        map.insert(1, 10).unwrap();
        assert!(map.insert(1, 11).is_err());
        assert_eq!(map.update(1, 12), Ok(10));
        assert_eq!(map.lookup(1), Some(12));
        assert!(map.contains_key(&1));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.read().bucket_count(), 32);
    }

    #[test]
    fn test_insert_batch_counts_successes() {
        let config = PerfectHashMapConfig::default().bucket_count(16);
        let map = SharedPerfectHashMap::with_config(config, ModularHashFamily::new()).unwrap();
        let inserted = map.insert_batch(vec![(1u32, 1u32), (2, 2), (1, 3), (17, 4)]);
        assert_eq!(inserted, 3);
        assert_eq!(map.lookup(17), Some(4));
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_concurrent_readers_with_writer() {
        let map: SharedPerfectHashMap<u32, u64> = SharedPerfectHashMap::new(4096);
        for key in 0..1000u32 {
            map.insert(key, key as u64).unwrap();
        }

        let writer = {
            let map = map.clone();
            thread::spawn(move || {
                for key in 1000..3000u32 {
                    map.insert(key, key as u64).unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let map = map.clone();
                thread::spawn(move || {
                    for _ in 0..5 {
                        let keys: Vec<u32> = (0..1000).collect();
                        let values = map.lookup_batch(&keys);
                        for (key, value) in keys.iter().zip(values) {
                            assert_eq!(value, Some(*key as u64), "已插入的键必须始终可见");
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(map.len(), 3000);
        map.check_invariants().unwrap();
        assert_eq!(map.stats().size, 3000);

        let Ok(map) = map.try_unwrap() else {
            panic!("没有其他克隆时应能取回内部表");
        };
        assert_eq!(map.lookup(2999), Some(2999));
    }
}
