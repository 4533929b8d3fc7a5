//! 统计模块 - 统一管理哈希表性能指标

pub mod operation;

use std::sync::Arc;

pub use operation::{
    AtomicOperationStats, DisabledOperationRecorder, OperationRecorder, OperationStatsSnapshot,
};

/// 默认操作统计记录器
pub fn default_recorder() -> Arc<dyn OperationRecorder> {
    Arc::new(AtomicOperationStats::new())
}

/// 不记录任何统计的记录器
pub fn disabled_recorder() -> Arc<dyn OperationRecorder> {
    Arc::new(DisabledOperationRecorder)
}
