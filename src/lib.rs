//! Rust动态完美哈希表库
//!
//! 基于 Cormack–Horspool–Kaiserweth 两级位移方案的动态完美哈希表：
//! 主哈希把键分到 `s` 个桶，每个桶在共享位移数组中拥有一段连续区域，
//! 插入时为桶搜索次哈希种子，使桶内所有键落在互不相同的槽位上。
//!
//! ## 主要特性
//! - 查询恒为两次哈希加一次比较，无链表、无探测
//! - 插入只搬迁一个桶，释放的区域会被后续分配复用
//! - 种子搜索有上限，失败时表状态不变
//! - 可插拔哈希族 (ahash / xxhash / 取模 / 查表)
//!
//! ## 快速开始
//!
//! ```rust
//! use perfect_hashtable::*;
//!
//! let mut map: PerfectHashMap<u32, &str> = PerfectHashMap::new(1024);
//!
//! // 插入键值对
//! map.insert(42, "answer").expect("插入失败");
//!
//! // 查询
//! assert_eq!(map.lookup(42), Some("answer"));
//! assert_eq!(map.lookup(7), None);
//!
//! // 重复插入不会覆盖
//! assert!(map.insert(42, "again").is_err());
//!
//! println!("{:?}", map.stats());
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod memory;
pub mod map;
pub mod stats;

// 公共接口导出
pub use crate::{
    error::PerfectHashError,
    hash::{
        default_hash_family, DefaultHashFamily, HashAlgorithm, HashFamily, HashFamilyType,
        ModularHashFamily, SeededHashFamily, TabulationHashFamily,
    },
    map::{
        BucketDescriptor, BucketDirectory, PerfectHashMap, PerfectHashMapConfig,
        PerfectHashMapStats, SharedPerfectHashMap, DEFAULT_BUCKET_COUNT, DEFAULT_MAX_SEED_ATTEMPTS,
    },
    memory::{DisplacementStore, Entry},
    stats::{OperationRecorder, OperationStatsSnapshot},
    types::{Key, OperationType, Value},
};

// 简化默认类型别名
pub type DefaultMap = PerfectHashMap<u32, Vec<u8>>;

// 便捷功能函数

/// 批量插入，返回成功插入的数量
///
/// 失败的条目(重复键、种子搜索耗尽等)被跳过并记录警告。
pub fn batch_insert<K: Key, V: Value, H: HashFamily>(
    map: &mut PerfectHashMap<K, V, H>,
    items: impl IntoIterator<Item = (K, V)>,
) -> usize {
    let mut count = 0;
    for (k, v) in items {
        match map.insert(k, v) {
            Ok(()) => count += 1,
            Err(e) => {
                log_warn!("batch insert skipped key {}: {}", k, e);
            }
        }
    }
    count
}

/// 批量查询
pub fn batch_get<'a, K: Key, V: Value, H: HashFamily>(
    map: &PerfectHashMap<K, V, H>,
    keys: impl IntoIterator<Item = &'a K>,
) -> Vec<Option<V>> {
    keys.into_iter().map(|k| map.lookup(*k)).collect()
}
