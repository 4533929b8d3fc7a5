// src/map/seed.rs
//! 种子搜索 - 为桶的当前键集寻找使次哈希互异的种子

use crate::hash::HashFamily;

/// 种子搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// 找到种子
    Found { seed: u32, attempts: u32 },
    /// 在上限内没有找到
    Exhausted { attempts: u32 },
}

impl SeedOutcome {
    pub fn attempts(&self) -> u32 {
        match *self {
            SeedOutcome::Found { attempts, .. } | SeedOutcome::Exhausted { attempts } => attempts,
        }
    }
}

/// 有界种子搜索
///
/// 候选种子从 1 开始递增（0 保留给单键桶），
/// 上限取 `max_attempts` 与哈希族 `max_seed()` 的较小值。
#[derive(Debug)]
pub struct SeedSearch {
    max_attempts: u32,
    hits: Vec<bool>,
}

impl SeedSearch {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            hits: Vec::new(),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 搜索使 `keys` 在 `[0, keys.len())` 上两两互异的种子
    pub fn search<H: HashFamily + ?Sized>(&mut self, family: &H, keys: &[u64]) -> SeedOutcome {
        let range = keys.len();
        let limit = self.max_attempts.min(family.max_seed());
        let mut attempts = 0;
        for seed in 1..=limit {
            attempts += 1;
            if self.are_distinct(family, seed, keys, range) {
                return SeedOutcome::Found { seed, attempts };
            }
        }
        SeedOutcome::Exhausted { attempts }
    }

    /// 互异性检验：每个键的次哈希槽位只能被命中一次
    pub fn are_distinct<H: HashFamily + ?Sized>(
        &mut self,
        family: &H,
        seed: u32,
        keys: &[u64],
        range: usize,
    ) -> bool {
        self.hits.clear();
        self.hits.resize(range, false);
        for &key in keys {
            let slot = family.secondary(seed, key, range);
            match self.hits.get_mut(slot) {
                Some(hit) if !*hit => *hit = true,
                _ => return false,
            }
        }
        true
    }
}
