//! 完美哈希表核心实现
//!
//! 两级结构：主哈希把键分到 `s` 个桶；每个桶在共享位移数组中占一段连续区域，
//! 桶内用带种子的次哈希定位槽位。插入时为该桶搜索新种子，使桶内所有键
//! (含新键) 的次哈希互异，然后把整个桶搬到一段新区域。查询恒为两次哈希加一次比较。

use crate::{
    error::PerfectHashError,
    hash::{default_hash_family, DefaultHashFamily, HashFamily},
    log_debug, log_warn,
    map::{
        directory::{BucketDescriptor, BucketDirectory},
        seed::{SeedOutcome, SeedSearch},
        DEFAULT_BUCKET_COUNT, DEFAULT_CONFIG, DEFAULT_MAX_SEED_ATTEMPTS, DEFAULT_TARGET_BUCKET_LOAD,
    },
    memory::{DisplacementStore, Entry},
    stats::{default_recorder, OperationRecorder, OperationStatsSnapshot},
    types::{Key, OperationType, Value},
};
use std::{fmt, sync::Arc};

/// 哈希表配置
#[derive(Clone, Debug, PartialEq)]
pub struct PerfectHashMapConfig {
    /// 主哈希桶数量 `s`
    pub bucket_count: usize,
    /// 单次种子搜索的最大尝试次数
    pub max_seed_attempts: u32,
    /// 期望的平均桶负载，用于按容量推算桶数量
    pub target_bucket_load: f32,
}

impl Default for PerfectHashMapConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            max_seed_attempts: DEFAULT_MAX_SEED_ATTEMPTS,
            target_bucket_load: DEFAULT_TARGET_BUCKET_LOAD,
        }
    }
}

impl PerfectHashMapConfig {
    /// 按预期键数量推算桶数量
    pub fn with_capacity(capacity_hint: usize) -> Self {
        let mut config = DEFAULT_CONFIG.clone();
        config.bucket_count = Self::buckets_for(capacity_hint, config.target_bucket_load);
        config
    }

    /// `ceil(capacity / load)`，至少 1 个桶
    pub fn buckets_for(capacity_hint: usize, target_bucket_load: f32) -> usize {
        if !(target_bucket_load.is_finite() && target_bucket_load > 0.0) {
            return capacity_hint.max(1);
        }
        ((capacity_hint as f64 / target_bucket_load as f64).ceil() as usize).max(1)
    }

    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn max_seed_attempts(mut self, max_seed_attempts: u32) -> Self {
        self.max_seed_attempts = max_seed_attempts;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), PerfectHashError> {
        if self.bucket_count == 0 {
            return Err(PerfectHashError::InvalidConfig {
                reason: "bucket_count 必须大于 0".into(),
            });
        }
        if self.max_seed_attempts == 0 {
            return Err(PerfectHashError::InvalidConfig {
                reason: "max_seed_attempts 必须大于 0".into(),
            });
        }
        if !(self.target_bucket_load.is_finite() && self.target_bucket_load > 0.0) {
            return Err(PerfectHashError::InvalidConfig {
                reason: format!("target_bucket_load 无效: {}", self.target_bucket_load),
            });
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone)]
pub struct PerfectHashMapStats {
    pub size: usize,
    pub bucket_count: usize,
    pub occupied_buckets: usize,
    pub max_bucket_size: usize,
    pub store_len: usize,
    pub free_slots: usize,
    /// 键数 / 位移数组长度
    pub load_factor: f32,
    pub operations: OperationStatsSnapshot,
}

/// 完美哈希表
pub struct PerfectHashMap<K: Key, V: Value, H: HashFamily = DefaultHashFamily> {
    config: PerfectHashMapConfig,
    family: H,
    directory: BucketDirectory,
    store: DisplacementStore<K, V>,
    seed_search: SeedSearch,
    len: usize,
    stats_recorder: Arc<dyn OperationRecorder>,
}

impl<K: Key, V: Value> PerfectHashMap<K, V, DefaultHashFamily> {
    /// 使用默认哈希族创建，桶数量按预期键数量推算
    pub fn new(capacity_hint: usize) -> Self {
        let config = PerfectHashMapConfig::with_capacity(capacity_hint);
        let mut map = Self::build(config, default_hash_family());
        map.store = DisplacementStore::with_capacity(capacity_hint);
        map
    }
}

impl<K: Key, V: Value> Default for PerfectHashMap<K, V, DefaultHashFamily> {
    fn default() -> Self {
        Self::build(DEFAULT_CONFIG.clone(), default_hash_family())
    }
}

impl<K: Key, V: Value, H: HashFamily> PerfectHashMap<K, V, H> {
    /// 使用指定配置与哈希族创建
    pub fn with_config(config: PerfectHashMapConfig, family: H) -> Result<Self, PerfectHashError> {
        config.validate()?;
        Ok(Self::build(config, family))
    }

    fn build(config: PerfectHashMapConfig, family: H) -> Self {
        Self {
            directory: BucketDirectory::new(config.bucket_count),
            store: DisplacementStore::new(),
            seed_search: SeedSearch::new(config.max_seed_attempts),
            len: 0,
            stats_recorder: default_recorder(),
            config,
            family,
        }
    }

    /// 替换统计记录器
    pub fn with_recorder(mut self, recorder: Arc<dyn OperationRecorder>) -> Self {
        self.stats_recorder = recorder;
        self
    }

    pub fn config(&self) -> &PerfectHashMapConfig {
        &self.config
    }

    pub fn family(&self) -> &H {
        &self.family
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.directory.len()
    }

    /// 键所属的桶，键超出定义域时返回 None
    pub fn bucket_of(&self, key: K) -> Option<usize> {
        if !key.fits_in(self.family.key_bits()) {
            return None;
        }
        Some(self.family.primary(key.to_word(), self.directory.len()))
    }

    pub fn bucket(&self, bucket: usize) -> Option<&BucketDescriptor> {
        self.directory.get(bucket)
    }

    /// 桶当前持有的条目
    pub fn bucket_entries(&self, bucket: usize) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.directory
            .get(bucket)
            .filter(|d| !d.is_empty())
            .into_iter()
            .flat_map(move |d| self.store.region(d.offset, d.size).flatten())
    }

    pub fn directory(&self) -> &BucketDirectory {
        &self.directory
    }

    pub fn store(&self) -> &DisplacementStore<K, V> {
        &self.store
    }

    /// 定位键所在槽位：两次哈希，一次比较
    fn find_slot(&self, key: K) -> Option<usize> {
        let bucket = self.bucket_of(key)?;
        let descriptor = self.directory.get(bucket)?;
        if descriptor.is_empty() {
            return None;
        }
        let offset = descriptor.offset + self.family.secondary(descriptor.seed, key.to_word(), descriptor.size);
        self.store
            .get(offset)
            .filter(|entry| entry.key == key)
            .map(|_| offset)
    }

    /// 获取值引用
    pub fn get(&self, key: &K) -> Option<&V> {
        let found = self.find_slot(*key).and_then(|offset| self.store.get(offset));
        self.stats_recorder.record(OperationType::Lookup, found.is_some());
        found.map(|entry| &entry.value)
    }

    /// 查询键，返回值的克隆
    pub fn lookup(&self, key: K) -> Option<V> {
        self.get(&key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_slot(*key).is_some()
    }

    /// 插入键值对
    ///
    /// 已存在的键返回 `DuplicateKey`，不会覆盖；修改值请使用 [`update`](Self::update)。
    /// 失败时表状态保持不变。
    pub fn insert(&mut self, key: K, value: V) -> Result<(), PerfectHashError> {
        let result = self.try_insert(key, value);
        self.stats_recorder.record(OperationType::Insert, result.is_ok());
        result
    }

    fn try_insert(&mut self, key: K, value: V) -> Result<(), PerfectHashError> {
        let bits = self.family.key_bits();
        if !key.fits_in(bits) {
            return Err(PerfectHashError::KeyOutOfDomain { key: key.to_word(), bits });
        }
        if self.find_slot(key).is_some() {
            return Err(PerfectHashError::DuplicateKey { key: key.to_string() });
        }

        let bucket = self.family.primary(key.to_word(), self.directory.len());
        let current = *self.directory.get(bucket).ok_or_else(|| PerfectHashError::CorruptedBucket {
            bucket,
            reason: format!("主哈希越界 (桶数量: {})", self.directory.len()),
        })?;

        if current.is_empty() {
            let offset = self.store.find_or_grow(1);
            self.store.set(offset, key, value);
            self.directory.set(bucket, BucketDescriptor::singleton(offset));
        } else {
            self.grow_bucket(bucket, current, key, value)?;
        }
        self.len += 1;
        Ok(())
    }

    /// 为桶搜索新种子并整体搬迁到长度加一的新区域
    fn grow_bucket(
        &mut self,
        bucket: usize,
        current: BucketDescriptor,
        key: K,
        value: V,
    ) -> Result<(), PerfectHashError> {
        let mut words = Vec::with_capacity(current.size + 1);
        for entry in self.store.region(current.offset, current.size) {
            match entry {
                Some(entry) => words.push(entry.key.to_word()),
                None => {
                    return Err(PerfectHashError::CorruptedBucket {
                        bucket,
                        reason: "桶区域内存在空槽".into(),
                    })
                }
            }
        }
        if words.len() != current.size {
            return Err(PerfectHashError::CorruptedBucket {
                bucket,
                reason: "桶区域超出位移数组".into(),
            });
        }
        let word = key.to_word();
        words.push(word);
        let new_size = words.len();

        // 搜索阶段不修改任何状态
        let outcome = self.seed_search.search(&self.family, &words);
        self.stats_recorder
            .record_many(OperationType::SeedAttempt, outcome.attempts() as u64);
        let seed = match outcome {
            SeedOutcome::Found { seed, attempts } => {
                log_debug!(
                    "bucket {} grows to {} keys with seed {} after {} attempts",
                    bucket, new_size, seed, attempts
                );
                seed
            }
            SeedOutcome::Exhausted { attempts } => {
                log_warn!(
                    "seed search exhausted for bucket {} at size {} after {} attempts",
                    bucket, new_size, attempts
                );
                self.stats_recorder.record(OperationType::Relocation, false);
                return Err(PerfectHashError::SeedSearchExhausted {
                    bucket,
                    size: new_size,
                    attempts,
                });
            }
        };

        // 新区域来自空闲段或追加，与所有现存区域不相交
        let new_offset = self.store.find_or_grow(new_size);
        let moved: Vec<Entry<K, V>> = current
            .region()
            .filter_map(|index| self.store.clear(index))
            .collect();
        for entry in moved {
            let slot = self.family.secondary(seed, entry.key.to_word(), new_size);
            self.store.set(new_offset + slot, entry.key, entry.value);
        }
        let slot = self.family.secondary(seed, word, new_size);
        self.store.set(new_offset + slot, key, value);

        self.directory
            .set(bucket, BucketDescriptor::new(new_offset, seed, new_size));
        self.store.release(current.offset, current.size);
        self.stats_recorder.record(OperationType::Relocation, true);
        Ok(())
    }

    /// 替换已有键的值，返回旧值
    ///
    /// 槽位位置不变，不涉及任何桶的重定位。
    pub fn update(&mut self, key: K, value: V) -> Result<V, PerfectHashError> {
        let result = match self.find_slot(key).and_then(|offset| self.store.get_mut(offset)) {
            Some(entry) => Ok(std::mem::replace(&mut entry.value, value)),
            None => Err(PerfectHashError::KeyNotFound { key: key.to_string() }),
        };
        self.stats_recorder.record(OperationType::Update, result.is_ok());
        result
    }

    /// 从当前状态重新推导并校验全部不变量
    ///
    /// - 非空桶区域不越界、不重叠、不与空闲段重叠，且区域内没有空槽；
    /// - 区域内每个键的主哈希指向该桶，且位于 `offset + secondary(seed, key, size)`；
    /// - 区域之外没有被占用的槽位，桶大小之和等于键数。
    pub fn check_invariants(&self) -> Result<(), PerfectHashError> {
        let bucket_count = self.directory.len();
        let mut owner: Vec<Option<usize>> = vec![None; self.store.len()];
        let mut total = 0;

        for (bucket, descriptor) in self.directory.occupied() {
            let corrupted = |reason: String| PerfectHashError::CorruptedBucket { bucket, reason };
            let region = descriptor.region();
            if region.end > self.store.len() {
                return Err(corrupted(format!(
                    "区域 {:?} 超出位移数组长度 {}",
                    region,
                    self.store.len()
                )));
            }
            for index in region {
                if let Some(other) = owner[index] {
                    return Err(corrupted(format!("槽位 {} 同时属于桶 {}", index, other)));
                }
                owner[index] = Some(bucket);
                if self.store.is_free(index) {
                    return Err(corrupted(format!("槽位 {} 位于空闲段内", index)));
                }
                let entry = self
                    .store
                    .get(index)
                    .ok_or_else(|| corrupted(format!("槽位 {} 为空", index)))?;
                let word = entry.key.to_word();
                if self.family.primary(word, bucket_count) != bucket {
                    return Err(corrupted(format!("键 {} 不属于该桶", entry.key)));
                }
                let slot = self.family.secondary(descriptor.seed, word, descriptor.size);
                if descriptor.offset + slot != index {
                    return Err(corrupted(format!(
                        "键 {} 位于槽位 {}，次哈希指向 {}",
                        entry.key,
                        index,
                        descriptor.offset + slot
                    )));
                }
            }
            total += descriptor.size;
        }

        for (index, owner) in owner.iter().enumerate() {
            if owner.is_none() {
                if let Some(entry) = self.store.get(index) {
                    return Err(PerfectHashError::InconsistentStore {
                        reason: format!("槽位 {} 持有键 {} 但不属于任何桶", index, entry.key),
                    });
                }
            }
        }
        if total != self.len || self.store.occupied() != self.len {
            return Err(PerfectHashError::InconsistentStore {
                reason: format!(
                    "键数 {}，桶大小之和 {}，占用槽位 {}",
                    self.len,
                    total,
                    self.store.occupied()
                ),
            });
        }
        Ok(())
    }

    /// 获取统计信息
    pub fn stats(&self) -> PerfectHashMapStats {
        let store_len = self.store.len();
        PerfectHashMapStats {
            size: self.len,
            bucket_count: self.directory.len(),
            occupied_buckets: self.directory.occupied_count(),
            max_bucket_size: self.directory.max_bucket_size(),
            store_len,
            free_slots: self.store.free_slots(),
            load_factor: if store_len == 0 {
                0.0
            } else {
                self.len as f32 / store_len as f32
            },
            operations: self.stats_recorder.snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats_recorder.export_prometheus()
    }
}

impl<K: Key, V: Value, H: HashFamily> fmt::Debug for PerfectHashMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerfectHashMap")
            .field("size", &self.len)
            .field("bucket_count", &self.directory.len())
            .field("store_len", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{HashAlgorithm, ModularHashFamily, SeededHashFamily, TabulationHashFamily};
    use crate::stats::disabled_recorder;
    use env_logger::{Builder, Env};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashSet;
    use std::io::Write;

    // 初始化日志记录器
    fn init_logger() {
        let env = Env::default().filter_or("RUST_LOG", "debug");
        let _ = Builder::from_env(env)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] {}:{} - {}",
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .is_test(true)
            .try_init();
    }

    /// 次哈希忽略种子：同桶第二个键必然无法分开
    struct SingleSlotFamily;

    impl HashFamily for SingleSlotFamily {
        fn primary(&self, key: u64, buckets: usize) -> usize {
            (key % buckets as u64) as usize
        }

        fn secondary(&self, _seed: u32, _key: u64, _range: usize) -> usize {
            0
        }
    }

    fn modular_map(buckets: usize) -> PerfectHashMap<u32, u64, ModularHashFamily> {
        let config = PerfectHashMapConfig::default().bucket_count(buckets);
        PerfectHashMap::with_config(config, ModularHashFamily::new()).expect("配置有效")
    }

    #[test]
    fn test_insert_and_lookup() {
        init_logger();
        let mut map: PerfectHashMap<u32, String> = PerfectHashMap::new(16);
        map.insert(1, "one".to_string()).unwrap();
        map.insert(2, "two".to_string()).unwrap();

        assert_eq!(map.lookup(1), Some("one".to_string()));
        assert_eq!(map.get(&2).map(String::as_str), Some("two"));
        assert_eq!(map.lookup(3), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.len(), 2);
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_new_derives_bucket_count() {
        let map: PerfectHashMap<u32, u32> = PerfectHashMap::new(1000);
        assert_eq!(map.bucket_count(), 500);
        let map: PerfectHashMap<u32, u32> = PerfectHashMap::new(0);
        assert_eq!(map.bucket_count(), 1);
        let map: PerfectHashMap<u32, u32> = PerfectHashMap::default();
        assert_eq!(map.bucket_count(), DEFAULT_BUCKET_COUNT);
        assert!(map.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = PerfectHashMapConfig::default().bucket_count(0);
        assert!(matches!(
            PerfectHashMap::<u32, u32, _>::with_config(config, ModularHashFamily::new()),
            Err(PerfectHashError::InvalidConfig { .. })
        ));
        let config = PerfectHashMapConfig::default().max_seed_attempts(0);
        assert!(config.validate().is_err());
        let config = PerfectHashMapConfig { target_bucket_load: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
        assert_eq!(PerfectHashMapConfig::buckets_for(10, 0.0), 10);
        assert_eq!(PerfectHashMapConfig::buckets_for(10, 3.0), 4);
    }

    #[test]
    fn test_same_bucket_scenario() {
        init_logger();
        let mut map = modular_map(4);
        for (i, key) in [3u32, 7, 11, 19].into_iter().enumerate() {
            map.insert(key, key as u64 * 10).unwrap();
            let descriptor = *map.bucket(3).unwrap();
            assert_eq!(descriptor.size, i + 1, "桶3应逐个增长");
            if i > 0 {
                assert!(descriptor.seed >= 1, "非单键桶的种子从1开始");
            }
            map.check_invariants().unwrap();
        }
        for key in [3u32, 7, 11, 19] {
            assert_eq!(map.lookup(key), Some(key as u64 * 10));
        }
        assert_eq!(map.lookup(15), None);
        for bucket in 0..3 {
            assert!(map.bucket(bucket).unwrap().is_empty());
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut map = modular_map(4);
        map.insert(3, 30).unwrap();
        map.insert(7, 70).unwrap();
        let before = *map.bucket(3).unwrap();

        let err = map.insert(7, 700).unwrap_err();
        assert_eq!(err, PerfectHashError::DuplicateKey { key: "7".into() });
        assert_eq!(*map.bucket(3).unwrap(), before);
        assert_eq!(map.lookup(7), Some(70));
        assert_eq!(map.len(), 2);
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_update_in_place() {
        let mut map = modular_map(4);
        map.insert(3, 30).unwrap();
        map.insert(7, 70).unwrap();
        let before = *map.bucket(3).unwrap();

        assert_eq!(map.update(7, 71), Ok(70));
        assert_eq!(map.lookup(7), Some(71));
        assert_eq!(*map.bucket(3).unwrap(), before);
        assert!(matches!(map.update(11, 1), Err(PerfectHashError::KeyNotFound { .. })));
    }

    #[test]
    fn test_seed_search_exhausted_leaves_table_unchanged() {
        let config = PerfectHashMapConfig::default().bucket_count(2).max_seed_attempts(64);
        let mut map: PerfectHashMap<u32, u32, _> =
            PerfectHashMap::with_config(config, SingleSlotFamily).unwrap();
        map.insert(0, 1).unwrap();
        map.insert(1, 2).unwrap();
        let store_len = map.store().len();
        let before = *map.bucket(0).unwrap();

        let err = map.insert(2, 3).unwrap_err();
        assert_eq!(err, PerfectHashError::SeedSearchExhausted { bucket: 0, size: 2, attempts: 64 });
        assert_eq!(*map.bucket(0).unwrap(), before);
        assert_eq!(map.store().len(), store_len);
        assert_eq!(map.lookup(0), Some(1));
        assert_eq!(map.lookup(2), None);
        assert_eq!(map.len(), 2);
        map.check_invariants().unwrap();

        let ops = map.stats().operations;
        assert_eq!(ops.seed_attempt_count, 64);
        assert_eq!(ops.failure_count, 2, "插入失败与重定位失败各记一次");
    }

    #[test]
    fn test_key_out_of_domain() {
        let config = PerfectHashMapConfig::default().bucket_count(64);
        let mut map: PerfectHashMap<u32, u32, _> =
            PerfectHashMap::with_config(config, TabulationHashFamily::new(42)).unwrap();
        map.insert(0xFFFF, 1).unwrap();
        assert_eq!(
            map.insert(0x1_0000, 2),
            Err(PerfectHashError::KeyOutOfDomain { key: 0x1_0000, bits: 16 })
        );
        assert_eq!(map.lookup(0x1_0000), None);
        assert_eq!(map.bucket_of(0x1_0000), None);
        assert_eq!(map.lookup(0xFFFF), Some(1));
    }

    #[test]
    fn test_random_keys_round_trip() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(42);
        let mut keys = HashSet::new();
        while keys.len() < 4000 {
            keys.insert(rng.gen::<u32>());
        }
        let keys: Vec<u32> = keys.into_iter().collect();
        let (inserted, held_out) = keys.split_at(3000);

        for algorithm in [HashAlgorithm::AHash, HashAlgorithm::XxHash, HashAlgorithm::Default] {
            let config = PerfectHashMapConfig::with_capacity(inserted.len());
            let mut map = PerfectHashMap::with_config(config, SeededHashFamily::new(algorithm))
                .unwrap()
                .with_recorder(disabled_recorder());
            for &key in inserted {
                map.insert(key, key as u64 + 1).unwrap();
            }
            map.check_invariants().unwrap();
            for &key in inserted {
                assert_eq!(map.lookup(key), Some(key as u64 + 1));
            }
            for &key in held_out {
                assert_eq!(map.lookup(key), None);
            }
            assert_eq!(map.len(), inserted.len());
        }
    }

    #[test]
    fn test_isolation_between_buckets() {
        let mut map = modular_map(8);
        for key in 0..40u32 {
            if key % 8 != 5 {
                map.insert(key, key as u64).unwrap();
            }
        }
        let snapshot: Vec<(BucketDescriptor, Vec<(u32, u64)>)> = (0..8)
            .map(|b| {
                let entries = map.bucket_entries(b).map(|e| (e.key, e.value)).collect();
                (*map.bucket(b).unwrap(), entries)
            })
            .collect();

        for key in [5u32, 13, 21] {
            map.insert(key, 0).unwrap();
            for b in (0..8).filter(|&b| b != 5) {
                let entries: Vec<(u32, u64)> = map.bucket_entries(b).map(|e| (e.key, e.value)).collect();
                assert_eq!(*map.bucket(b).unwrap(), snapshot[b].0, "桶 {} 的描述符不应改变", b);
                assert_eq!(entries, snapshot[b].1, "桶 {} 的内容不应改变", b);
            }
        }
        assert_eq!(map.bucket(5).unwrap().size, 3);
    }

    #[test]
    fn test_stats() {
        let mut map = modular_map(4);
        for key in [3u32, 7, 11, 2] {
            map.insert(key, 0).unwrap();
        }
        map.lookup(3);
        map.lookup(100);
        let stats = map.stats();
        assert_eq!(stats.size, 4);
        assert_eq!(stats.bucket_count, 4);
        assert_eq!(stats.occupied_buckets, 2);
        assert_eq!(stats.max_bucket_size, 3);
        assert_eq!(stats.operations.insert_count, 4);
        assert_eq!(stats.operations.relocation_count, 2);
        assert_eq!(stats.operations.lookup_count, 2);
        assert_eq!(stats.operations.lookup_miss_count, 1);
        assert!(stats.load_factor > 0.0 && stats.load_factor <= 1.0);
        assert!(map.export_prometheus().contains("perfect_hash_insert_count 4"));
        assert!(format!("{:?}", map).contains("size: 4"));
    }
}
