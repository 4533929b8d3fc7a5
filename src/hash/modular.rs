//! 取模哈希族 - 主哈希为 `key % s`，次哈希由 Park–Miller 生成器驱动
//!
//! 桶路由完全可预测，便于构造“多个键落入同一桶”的场景。

use crate::hash::family::{reduce, HashFamily, HashFamilyType};

/// Park–Miller 最小标准生成器模数 2^31 - 1
const MSR_MODULUS: u64 = 2_147_483_647;
const MSR_MULTIPLIER: u64 = 16_807;
const MIX_ROUNDS: usize = 2;

#[inline]
fn msr(x: u64) -> u64 {
    (MSR_MULTIPLIER * x) % MSR_MODULUS
}

/// splitmix64 收尾混合，双射
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModularHashFamily;

impl ModularHashFamily {
    pub fn new() -> Self {
        Self
    }
}

impl HashFamily for ModularHashFamily {
    fn primary(&self, key: u64, buckets: usize) -> usize {
        reduce(key, buckets)
    }

    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
        if range <= 1 {
            return 0;
        }
        // 生成器状态必须非零
        let mut state = seed as u64 % (MSR_MODULUS - 1) + 1;
        let mut h = key;
        for _ in 0..MIX_ROUNDS {
            state = msr(state);
            h = mix64(h ^ state);
        }
        reduce(h, range)
    }

    fn family_type(&self) -> HashFamilyType {
        HashFamilyType::Modular
    }
}
