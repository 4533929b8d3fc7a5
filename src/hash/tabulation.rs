//! 查表哈希族 - 按半字节切片的可参数化哈希
//!
//! 每轮取种子与键各自的低 4 位拼成 8 位索引，查一张 256 项的随机表并异或累加，
//! 然后两者各右移 4 位。四轮覆盖 16 位键和 16 位种子。

use crate::hash::family::{reduce, HashFamily, HashFamilyType};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ROUNDS: usize = 4;
const NIBBLE_BITS: u32 = 4;
const NIBBLE_MASK: u64 = 0xF;
const TABLE_SIZE: usize = 1 << (2 * NIBBLE_BITS);

/// 定义域位宽
pub const TABULATION_KEY_BITS: u32 = NIBBLE_BITS * ROUNDS as u32;

type Tables = [[u16; TABLE_SIZE]; ROUNDS];

#[derive(Clone)]
pub struct TabulationHashFamily {
    primary_tables: Box<Tables>,
    secondary_tables: Box<Tables>,
}

impl TabulationHashFamily {
    /// 用给定随机种子生成查找表
    pub fn new(rng_seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let primary_tables = Self::random_tables(&mut rng);
        let secondary_tables = Self::random_tables(&mut rng);
        Self {
            primary_tables,
            secondary_tables,
        }
    }

    fn random_tables(rng: &mut StdRng) -> Box<Tables> {
        let mut tables = Box::new([[0u16; TABLE_SIZE]; ROUNDS]);
        for table in tables.iter_mut() {
            rng.fill(&mut table[..]);
        }
        tables
    }

    #[inline]
    fn evaluate(tables: &Tables, mut param: u64, mut word: u64) -> u16 {
        let mut acc = 0u16;
        for table in tables.iter() {
            let index = (((param & NIBBLE_MASK) << NIBBLE_BITS) | (word & NIBBLE_MASK)) as usize;
            acc ^= table[index];
            param >>= NIBBLE_BITS;
            word >>= NIBBLE_BITS;
        }
        acc
    }
}

impl std::fmt::Debug for TabulationHashFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabulationHashFamily")
            .field("rounds", &ROUNDS)
            .field("key_bits", &TABULATION_KEY_BITS)
            .finish()
    }
}

impl HashFamily for TabulationHashFamily {
    fn primary(&self, key: u64, buckets: usize) -> usize {
        reduce(Self::evaluate(&self.primary_tables, 0, key) as u64, buckets)
    }

    fn secondary(&self, seed: u32, key: u64, range: usize) -> usize {
        if range <= 1 {
            return 0;
        }
        reduce(Self::evaluate(&self.secondary_tables, seed as u64, key) as u64, range)
    }

    fn key_bits(&self) -> u32 {
        TABULATION_KEY_BITS
    }

    fn max_seed(&self) -> u32 {
        (1u32 << TABULATION_KEY_BITS) - 1
    }

    fn family_type(&self) -> HashFamilyType {
        HashFamilyType::Tabulation
    }
}
