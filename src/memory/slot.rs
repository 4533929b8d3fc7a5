// src/memory/slot.rs
//! 槽位 - 位移数组中的单个单元，空或持有一个键值对

use crate::types::{Key, Value};

/// 键值条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: Key, V: Value> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// 槽位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<K, V> {
    entry: Option<Entry<K, V>>,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: Key, V: Value> Slot<K, V> {
    /// 创建空槽位
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn is_occupied(&self) -> bool {
        self.entry.is_some()
    }

    pub fn entry(&self) -> Option<&Entry<K, V>> {
        self.entry.as_ref()
    }

    pub fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        self.entry.as_mut()
    }

    /// 槽位中的键
    pub fn key(&self) -> Option<K> {
        self.entry.as_ref().map(|e| e.key)
    }

    /// 写入键值，返回被覆盖的旧条目
    pub fn store(&mut self, key: K, value: V) -> Option<Entry<K, V>> {
        self.entry.replace(Entry::new(key, value))
    }

    /// 清空槽位，返回原条目
    pub fn take(&mut self) -> Option<Entry<K, V>> {
        self.entry.take()
    }

    /// 判断槽位是否持有指定键
    pub fn holds(&self, key: K) -> bool {
        matches!(&self.entry, Some(e) if e.key == key)
    }
}
