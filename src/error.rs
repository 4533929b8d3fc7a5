//! 统一错误处理 - 所有可能错误类型和恢复逻辑

/// 完美哈希表可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerfectHashError {
    #[error("种子搜索耗尽: 桶 {bucket} 扩展到 {size} 个键时尝试 {attempts} 个种子均未得到互异槽位")]
    SeedSearchExhausted {
        bucket: usize,
        size: usize,
        attempts: u32,
    },

    #[error("键已存在: {key}")]
    DuplicateKey {
        key: String,
    },

    #[error("键超出哈希族定义域: {key:#x} (位宽: {bits})")]
    KeyOutOfDomain {
        key: u64,
        bits: u32,
    },

    #[error("键不存在: {key}")]
    KeyNotFound {
        key: String,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("桶 {bucket} 状态损坏: {reason}")]
    CorruptedBucket {
        bucket: usize,
        reason: String,
    },

    #[error("位移数组状态不一致: {reason}")]
    InconsistentStore {
        reason: String,
    },
}

impl PerfectHashError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SeedSearchExhausted { .. } => Some("增大桶数量、提高种子尝试上限或更换哈希族"),
            Self::DuplicateKey { .. } => Some("使用 update 修改已有键的值"),
            Self::KeyOutOfDomain { .. } => Some("使用位宽更大的哈希族"),
            Self::KeyNotFound { .. } => Some("确认键值是否存在"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
            Self::CorruptedBucket { .. } | Self::InconsistentStore { .. } => None,
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 状态损坏说明表内部不变量已被破坏，无法继续安全使用。
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CorruptedBucket { .. } | Self::InconsistentStore { .. })
    }

    /// 是否可以换一种表形状(桶数/哈希族)后重试同一插入
    pub fn should_retry_with_new_shape(&self) -> bool {
        matches!(self, Self::SeedSearchExhausted { .. } | Self::KeyOutOfDomain { .. })
    }
}
