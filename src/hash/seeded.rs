//! 通用带种子哈希族 - 基于 ahash / xxhash / SipHash

use crate::hash::family::{reduce, HashFamily, HashFamilyType, WordHasher};
use ahash::RandomState;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{BuildHasher, Hasher},
    sync::Arc,
};

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    AHash,
    XxHash,
    Default,
}

/// 主哈希使用的种子，超出 u32 范围，不会与次哈希种子重合
const PRIMARY_SEED: u64 = u64::MAX;

// ahash 固定密钥，保证跨进程结果一致
const AHASH_KEYS: [u64; 4] = [
    0x243F_6A88_85A3_08D3,
    0x1319_8A2E_0370_7344,
    0xA409_3822_299F_31D0,
    0x082E_FA98_EC4E_6C89,
];

/// 带种子哈希族
///
/// 主哈希与次哈希共用同一底层算法，以种子区分。
#[derive(Clone)]
pub struct SeededHashFamily {
    hasher: Arc<dyn WordHasher>,
    algorithm: HashAlgorithm,
}

impl SeededHashFamily {
    /// 创建新哈希族
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Self::build_hasher_function(algorithm),
            algorithm,
        }
    }

    /// 获取底层算法
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// 构建哈希函数
    fn build_hasher_function(algorithm: HashAlgorithm) -> Arc<dyn WordHasher> {
        match algorithm {
            HashAlgorithm::AHash => {
                let state = RandomState::with_seeds(
                    AHASH_KEYS[0],
                    AHASH_KEYS[1],
                    AHASH_KEYS[2],
                    AHASH_KEYS[3],
                );
                Arc::new(move |seed: u64, word: u64| {
                    let mut hasher = state.build_hasher();
                    hasher.write_u64(seed);
                    hasher.write_u64(word);
                    hasher.finish()
                })
            }
            HashAlgorithm::XxHash => Arc::new(|seed: u64, word: u64| {
                let mut hasher = twox_hash::XxHash64::with_seed(seed);
                hasher.write_u64(word);
                hasher.finish()
            }),
            HashAlgorithm::Default => Arc::new(|seed: u64, word: u64| {
                let mut hasher = DefaultHasher::new();
                hasher.write_u64(seed);
                hasher.write_u64(word);
                hasher.finish()
            }),
        }
    }
}

impl Default for SeededHashFamily {
    fn default() -> Self {
        Self::new(HashAlgorithm::AHash)
    }
}

impl std::fmt::Debug for SeededHashFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededHashFamily")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl HashFamily for SeededHashFamily {
    fn primary(&self, key: u64, buckets: usize) -> usize {
        reduce(self.hasher.hash_word(PRIMARY_SEED, key), buckets)
    }

    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
        if range <= 1 {
            return 0;
        }
        reduce(self.hasher.hash_word(seed as u64, key), range)
    }

    fn family_type(&self) -> HashFamilyType {
        HashFamilyType::Seeded
    }
}
