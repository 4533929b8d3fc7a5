// src/memory/store.rs
//! 位移数组 - 所有桶区域共享的可增长槽位数组
//!
//! 桶区域总是连续的；重定位留下的空洞记录在空闲段索引中，
//! 供后续分配按首次适配复用。

use crate::{
    log_debug,
    memory::slot::{Entry, Slot},
    types::{Key, Value},
};
use std::collections::BTreeMap;

/// 位移数组统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// 数组长度
    pub len: usize,
    /// 已占用槽位数
    pub occupied: usize,
    /// 空闲段中的槽位数
    pub free_slots: usize,
    /// 空闲段数量
    pub free_runs: usize,
    /// 累计追加的槽位数
    pub grown_slots: u64,
    /// 复用空闲段的次数
    pub reused_runs: u64,
}

/// 位移数组
#[derive(Debug, Clone)]
pub struct DisplacementStore<K, V> {
    slots: Vec<Slot<K, V>>,
    /// 空闲段: 起始偏移 -> 长度，相邻段总是合并
    free_runs: BTreeMap<usize, usize>,
    occupied: usize,
    grown_slots: u64,
    reused_runs: u64,
}

impl<K: Key, V: Value> Default for DisplacementStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V: Value> DisplacementStore<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// 预留底层数组容量（不改变长度）
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_runs: BTreeMap::new(),
            occupied: 0,
            grown_slots: 0,
            reused_runs: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn free_slots(&self) -> usize {
        self.free_runs.values().sum()
    }

    /// 当前空闲段列表 (起始偏移, 长度)
    pub fn free_runs(&self) -> Vec<(usize, usize)> {
        self.free_runs.iter().map(|(&start, &len)| (start, len)).collect()
    }

    /// 判断偏移是否位于某个空闲段内
    pub fn is_free(&self, offset: usize) -> bool {
        self.free_runs
            .range(..=offset)
            .next_back()
            .map_or(false, |(&start, &len)| offset < start + len)
    }

    /// 寻找或追加长度为 `r` 的连续空闲段，返回其起始偏移
    ///
    /// 返回的段从空闲索引中移除，归调用方所有。
    /// 首次适配；更长的段被切分，剩余部分留在索引中。
    /// 没有合适的段时，若末尾存在空闲段则就地延长，否则在末尾追加。
    pub fn find_or_grow(&mut self, r: usize) -> usize {
        if r == 0 {
            return self.slots.len();
        }

        let fit = self
            .free_runs
            .iter()
            .find(|(_, &len)| len >= r)
            .map(|(&start, &len)| (start, len));
        if let Some((start, len)) = fit {
            self.free_runs.remove(&start);
            if len > r {
                self.free_runs.insert(start + r, len - r);
            }
            self.reused_runs += 1;
            return start;
        }

        let end = self.slots.len();
        let start = match self.free_runs.iter().next_back() {
            Some((&start, &len)) if start + len == end => {
                self.free_runs.remove(&start);
                start
            }
            _ => end,
        };
        let need = r - (end - start);
        self.slots.resize_with(end + need, Slot::default);
        self.grown_slots += need as u64;
        log_debug!("displacement store grew by {} slots to {}", need, self.slots.len());
        start
    }

    /// 释放 `[offset, offset + r)`，清空槽位并归还空闲索引
    pub fn release(&mut self, offset: usize, r: usize) {
        debug_assert!(offset + r <= self.slots.len(), "释放区域越界");
        let end = (offset + r).min(self.slots.len());
        if offset >= end {
            return;
        }
        for index in offset..end {
            self.clear(index);
        }

        let mut start = offset;
        let mut len = end - offset;
        let before = self
            .free_runs
            .range(..offset)
            .next_back()
            .map(|(&s, &l)| (s, l));
        if let Some((prev_start, prev_len)) = before {
            if prev_start + prev_len == offset {
                self.free_runs.remove(&prev_start);
                start = prev_start;
                len += prev_len;
            }
        }
        if let Some(next_len) = self.free_runs.remove(&end) {
            len += next_len;
        }
        self.free_runs.insert(start, len);
    }

    pub fn get(&self, offset: usize) -> Option<&Entry<K, V>> {
        self.slots.get(offset).and_then(Slot::entry)
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(offset).and_then(Slot::entry_mut)
    }

    /// 写入槽位
    ///
    /// # Panics
    /// `offset` 越界时 panic。
    pub fn set(&mut self, offset: usize, key: K, value: V) -> Option<Entry<K, V>> {
        let old = self.slots[offset].store(key, value);
        if old.is_none() {
            self.occupied += 1;
        }
        old
    }

    /// 清空单个槽位，不归还空闲索引
    pub fn clear(&mut self, offset: usize) -> Option<Entry<K, V>> {
        let old = self.slots.get_mut(offset).and_then(Slot::take);
        if old.is_some() {
            self.occupied -= 1;
        }
        old
    }

    /// 遍历区域 `[offset, offset + r)` 内的槽位
    pub fn region(&self, offset: usize, r: usize) -> impl Iterator<Item = Option<&Entry<K, V>>> + '_ {
        let end = (offset + r).min(self.slots.len());
        self.slots[offset.min(end)..end].iter().map(Slot::entry)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            len: self.slots.len(),
            occupied: self.occupied,
            free_slots: self.free_slots(),
            free_runs: self.free_runs.len(),
            grown_slots: self.grown_slots,
            reused_runs: self.reused_runs,
        }
    }
}
