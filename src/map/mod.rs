//! 哈希表核心模块 - 实现完美哈希表及其组件

pub mod directory;
pub mod perfect_map;
pub mod seed;
pub mod shared;

pub use directory::{BucketDescriptor, BucketDirectory};
pub use perfect_map::{PerfectHashMap, PerfectHashMapConfig, PerfectHashMapStats};
pub use seed::{SeedOutcome, SeedSearch};
pub use shared::SharedPerfectHashMap;

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<PerfectHashMapConfig> = Lazy::new(PerfectHashMapConfig::default);

// 默认参数
pub const DEFAULT_BUCKET_COUNT: usize = 1024;
pub const DEFAULT_MAX_SEED_ATTEMPTS: u32 = 1_000_000;
pub const DEFAULT_TARGET_BUCKET_LOAD: f32 = 2.0;
