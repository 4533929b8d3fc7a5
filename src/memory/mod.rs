//! 内存管理模块 - 位移数组与槽位

pub mod slot;
pub mod store;

pub use slot::{Entry, Slot};
pub use store::{DisplacementStore, StoreStats};
