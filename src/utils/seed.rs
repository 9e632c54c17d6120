use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Per-producer seed: stable across platforms and releases (FNV-1a over the
/// producer name, mixed with the run seed).
pub fn derive_seed(base: u64, producer: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in base.to_le_bytes().iter().chain(producer.as_bytes()) {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

pub fn producer_rng(base: u64, producer: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(base, producer))
}
