//! 哈希族模块 - 定义主哈希/带种子次哈希的统一契约

use std::sync::Arc;

/// 哈希族类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFamilyType {
    Seeded,
    Modular,
    Tabulation,
    Custom,
}

/// 哈希族特征
///
/// 表只依赖以下契约：
/// - `primary(key, s)` 落在 `[0, s)`；
/// - `secondary(seed, key, r)` 落在 `[0, r)`，`r == 1` 时恒为 0；
/// - 两者都是输入的纯函数，同样的输入在搜索期和之后的重定位期必须给出同样的结果。
///
/// 均匀性只影响种子搜索的期望代价，与正确性无关。
pub trait HashFamily: Send + Sync {
    /// 主哈希：键 -> 桶索引
    fn primary(&self, key: u64, buckets: usize) -> usize;

    /// 次哈希：(种子, 键) -> 桶区域内偏移
    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize;

    /// 定义域位宽，超出的键会被拒绝
    fn key_bits(&self) -> u32 {
        64
    }

    /// 可用的最大种子
    fn max_seed(&self) -> u32 {
        u32::MAX
    }

    /// 获取哈希族类型
    fn family_type(&self) -> HashFamilyType {
        HashFamilyType::Custom
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Box<H> {
    fn primary(&self, key: u64, buckets: usize) -> usize {
        (**self).primary(key, buckets)
    }

    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
        (**self).secondary(seed, key, range)
    }

    fn key_bits(&self) -> u32 {
        (**self).key_bits()
    }

    fn max_seed(&self) -> u32 {
        (**self).max_seed()
    }

    fn family_type(&self) -> HashFamilyType {
        (**self).family_type()
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Arc<H> {
    fn primary(&self, key: u64, buckets: usize) -> usize {
        (**self).primary(key, buckets)
    }

    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
        (**self).secondary(seed, key, range)
    }

    fn key_bits(&self) -> u32 {
        (**self).key_bits()
    }

    fn max_seed(&self) -> u32 {
        (**self).max_seed()
    }

    fn family_type(&self) -> HashFamilyType {
        (**self).family_type()
    }
}

/// 带种子的字哈希函数
pub trait WordHasher: Send + Sync {
    fn hash_word(&self, seed: u64, word: u64) -> u64;
}

impl<T> WordHasher for T
where
    T: Fn(u64, u64) -> u64 + Send + Sync,
{
    fn hash_word(&self, seed: u64, word: u64) -> u64 {
        self(seed, word)
    }
}

/// 把 64 位哈希值归约到 `[0, range)`
#[inline]
pub(crate) fn reduce(hash: u64, range: usize) -> usize {
    if range <= 1 {
        0
    } else {
        (hash % range as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdentityFamily;

    impl HashFamily for IdentityFamily {
        fn primary(&self, key: u64, buckets: usize) -> usize {
            reduce(key, buckets)
        }

        fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
            reduce(key.wrapping_add(seed as u64), range)
        }
    }

    #[test]
    fn test_defaults_and_forwarding() {
        let boxed: Box<dyn HashFamily> = Box::new(IdentityFamily);
        assert_eq!(boxed.key_bits(), 64);
        assert_eq!(boxed.max_seed(), u32::MAX);
        assert_eq!(boxed.family_type(), HashFamilyType::Custom);
        assert_eq!(boxed.primary(10, 4), 2);

        let shared = Arc::new(IdentityFamily);
        assert_eq!(shared.secondary(1, 10, 4), 3);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(123, 100), 23);
        assert_eq!(reduce(u64::MAX, 1), 0);
        assert_eq!(reduce(7, 0), 0);
    }

    #[test]
    fn test_word_hasher_closure() {
        let hasher = |seed: u64, word: u64| seed ^ word;
        assert_eq!(hasher.hash_word(0b1010, 0b0110), 0b1100);
    }
}
