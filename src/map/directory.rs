// src/map/directory.rs
//! 桶目录 - 每个主哈希桶一个 (offset, seed, size) 描述符

use std::ops::Range;

/// 桶描述符
///
/// `size == 0` 时桶为空，`offset` 与 `seed` 无意义。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketDescriptor {
    pub offset: usize,
    pub seed: u32,
    pub size: usize,
}

impl BucketDescriptor {
    pub const EMPTY: BucketDescriptor = BucketDescriptor { offset: 0, seed: 0, size: 0 };

    pub fn new(offset: usize, seed: u32, size: usize) -> Self {
        Self { offset, seed, size }
    }

    /// 单键桶，种子固定为 0
    pub fn singleton(offset: usize) -> Self {
        Self::new(offset, 0, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 桶在位移数组中占用的区域
    pub fn region(&self) -> Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            self.offset..self.offset + self.size
        }
    }
}

/// 桶目录
#[derive(Debug, Clone)]
pub struct BucketDirectory {
    buckets: Vec<BucketDescriptor>,
}

impl BucketDirectory {
    /// 创建 `bucket_count` 个空桶
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![BucketDescriptor::EMPTY; bucket_count],
        }
    }

    /// 桶数量 `s`
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, bucket: usize) -> Option<&BucketDescriptor> {
        self.buckets.get(bucket)
    }

    /// 替换描述符，返回旧值
    ///
    /// # Panics
    /// 桶索引越界时 panic。
    pub fn set(&mut self, bucket: usize, descriptor: BucketDescriptor) -> BucketDescriptor {
        std::mem::replace(&mut self.buckets[bucket], descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &BucketDescriptor)> + '_ {
        self.buckets.iter().enumerate()
    }

    /// 非空桶
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &BucketDescriptor)> + '_ {
        self.iter().filter(|(_, d)| !d.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.buckets.iter().filter(|d| !d.is_empty()).count()
    }

    /// 所有桶的键总数
    pub fn total_keys(&self) -> usize {
        self.buckets.iter().map(|d| d.size).sum()
    }

    pub fn max_bucket_size(&self) -> usize {
        self.buckets.iter().map(|d| d.size).max().unwrap_or(0)
    }

    /// 桶负载分布：下标为桶大小，值为该大小的桶数量
    pub fn load_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0; self.max_bucket_size() + 1];
        for d in &self.buckets {
            histogram[d.size] += 1;
        }
        histogram
    }
}
