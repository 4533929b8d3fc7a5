// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作计数

use crate::types::OperationType;
use std::sync::atomic::{AtomicU64, Ordering};

const METRIC_PREFIX: &str = "perfect_hash";

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录一次操作
    ///
    /// 查询的 `success` 表示命中；其余操作表示是否成功。
    fn record(&self, op_type: OperationType, success: bool);

    /// 一次性累加计数（如一次种子搜索的全部尝试）
    fn record_many(&self, op_type: OperationType, count: u64);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub lookup_count: u64,
    pub update_count: u64,
    pub seed_attempt_count: u64,
    pub relocation_count: u64,
    pub lookup_miss_count: u64,
    pub failure_count: u64,
}

impl OperationStatsSnapshot {
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Lookup => self.lookup_count,
            OperationType::Update => self.update_count,
            OperationType::SeedAttempt => self.seed_attempt_count,
            OperationType::Relocation => self.relocation_count,
        }
    }

    /// 平均每次重定位尝试的种子数
    pub fn seed_attempts_per_relocation(&self) -> f64 {
        if self.relocation_count == 0 {
            0.0
        } else {
            self.seed_attempt_count as f64 / self.relocation_count as f64
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    lookup_count: AtomicU64,
    update_count: AtomicU64,
    seed_attempt_count: AtomicU64,
    relocation_count: AtomicU64,
    lookup_miss_count: AtomicU64,
    failure_count: AtomicU64,
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Lookup => &self.lookup_count,
            OperationType::Update => &self.update_count,
            OperationType::SeedAttempt => &self.seed_attempt_count,
            OperationType::Relocation => &self.relocation_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, success: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        if !success {
            if op_type.is_read() {
                self.lookup_miss_count.fetch_add(1, Ordering::Relaxed);
            } else {
                self.failure_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn record_many(&self, op_type: OperationType, count: u64) {
        self.counter(op_type).fetch_add(count, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            lookup_count: self.lookup_count.load(Ordering::Relaxed),
            update_count: self.update_count.load(Ordering::Relaxed),
            seed_attempt_count: self.seed_attempt_count.load(Ordering::Relaxed),
            relocation_count: self.relocation_count.load(Ordering::Relaxed),
            lookup_miss_count: self.lookup_miss_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.insert_count.store(0, Ordering::Relaxed);
        self.lookup_count.store(0, Ordering::Relaxed);
        self.update_count.store(0, Ordering::Relaxed);
        self.seed_attempt_count.store(0, Ordering::Relaxed);
        self.relocation_count.store(0, Ordering::Relaxed);
        self.lookup_miss_count.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut output = String::new();

        let op_types = [
            OperationType::Insert,
            OperationType::Lookup,
            OperationType::Update,
            OperationType::SeedAttempt,
            OperationType::Relocation,
        ];

        for op in op_types {
            let name = op.metric_name();
            output.push_str(&format!(
                "# HELP {METRIC_PREFIX}_{name}_count Total {name} operations\n"
            ));
            output.push_str(&format!("# TYPE {METRIC_PREFIX}_{name}_count counter\n"));
            output.push_str(&format!("{METRIC_PREFIX}_{name}_count {}\n", snapshot.count(op)));
        }

        output.push_str(&format!("# HELP {METRIC_PREFIX}_lookup_miss_count Lookups that found nothing\n"));
        output.push_str(&format!("# TYPE {METRIC_PREFIX}_lookup_miss_count counter\n"));
        output.push_str(&format!("{METRIC_PREFIX}_lookup_miss_count {}\n", snapshot.lookup_miss_count));

        output.push_str(&format!("# HELP {METRIC_PREFIX}_failure_count Failed write operations\n"));
        output.push_str(&format!("# TYPE {METRIC_PREFIX}_failure_count counter\n"));
        output.push_str(&format!("{METRIC_PREFIX}_failure_count {}\n", snapshot.failure_count));

        output
    }
}

/// 禁用操作统计实现
#[derive(Debug, Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _success: bool) {}
    fn record_many(&self, _op_type: OperationType, _count: u64) {}
    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot::default()
    }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Insert, true);
        stats.record(OperationType::Insert, false);
        stats.record(OperationType::Lookup, true);
        stats.record(OperationType::Lookup, false);
        stats.record(OperationType::Relocation, true);
        stats.record_many(OperationType::SeedAttempt, 12);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.insert_count, 2);
        assert_eq!(snapshot.failure_count, 1);
        assert_eq!(snapshot.lookup_count, 2);
        assert_eq!(snapshot.lookup_miss_count, 1);
        assert_eq!(snapshot.count(OperationType::SeedAttempt), 12);
        assert_eq!(snapshot.seed_attempts_per_relocation(), 12.0);

        stats.reset();
        assert_eq!(stats.snapshot(), OperationStatsSnapshot::default());
    }

    #[test]
    fn test_export_prometheus() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Lookup, true);
        let text = stats.export_prometheus();
        assert!(text.contains("# TYPE perfect_hash_lookup_count counter"));
        assert!(text.contains("perfect_hash_lookup_count 1\n"));
        assert!(text.contains("perfect_hash_seed_attempt_count 0\n"));
    }

    #[test]
    fn test_disabled_recorder() {
        let stats = DisabledOperationRecorder;
        stats.record(OperationType::Insert, true);
        assert_eq!(stats.snapshot().insert_count, 0);
        assert!(stats.export_prometheus().is_empty());
    }
}
