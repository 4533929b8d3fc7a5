//! 核心类型定义 - 共享类型和接口

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// 键特征 - 定宽无符号整数
///
/// 完美哈希表只要求键可比较并能以机器字的形式交给哈希族，
/// 因此键统一提升为 `u64` 参与哈希计算。
pub trait Key: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// 键的位宽
    const BITS: u32;

    /// 转换为哈希族使用的机器字
    fn to_word(self) -> u64;

    /// 判断键是否落在给定位宽的定义域内
    fn fits_in(self, bits: u32) -> bool {
        bits >= 64 || self.to_word() >> bits == 0
    }
}

macro_rules! impl_key_for_uint {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn to_word(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_key_for_uint!(u8, u16, u32, u64, usize);

/// 值类型 - 不透明负载，要求可克隆
pub trait Value: Clone + Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + Debug + Send + Sync + 'static {}

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入操作
    Insert,
    /// 查询操作
    Lookup,
    /// 更新操作
    Update,
    /// 种子搜索(单次候选种子检验)
    SeedAttempt,
    /// 桶重定位
    Relocation,
}

impl OperationType {
    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::Lookup)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            OperationType::Insert | OperationType::Update | OperationType::Relocation
        )
    }

    /// Prometheus 指标名后缀
    pub fn metric_name(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Lookup => "lookup",
            OperationType::Update => "update",
            OperationType::SeedAttempt => "seed_attempt",
            OperationType::Relocation => "relocation",
        }
    }
}
