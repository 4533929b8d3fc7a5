//! 哈希模块 - 统一管理哈希族

pub mod family;
pub mod seeded;
pub mod modular;
pub mod tabulation;

pub use family::{HashFamily, HashFamilyType, WordHasher};
pub use seeded::{HashAlgorithm, SeededHashFamily};
pub use modular::ModularHashFamily;
pub use tabulation::{TabulationHashFamily, TABULATION_KEY_BITS};

/// 默认哈希族
pub type DefaultHashFamily = SeededHashFamily;

/// 创建默认哈希族
pub fn default_hash_family() -> DefaultHashFamily {
    SeededHashFamily::new(HashAlgorithm::AHash)
}

/// 创建装箱哈希族，便于运行期选择
pub fn boxed_hash_family(family_type: HashFamilyType) -> Box<dyn HashFamily> {
    match family_type {
        HashFamilyType::Seeded | HashFamilyType::Custom => Box::new(default_hash_family()),
        HashFamilyType::Modular => Box::new(ModularHashFamily::new()),
        HashFamilyType::Tabulation => Box::new(TabulationHashFamily::new(0)),
    }
}
