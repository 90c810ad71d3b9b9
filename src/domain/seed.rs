//! Deterministic seed derivation.
//!
//! Every random draw in the crate comes from a [`StdRng`] built here. A stream
//! is identified by a symbol plus a [`Stream`] salt, so each sub-operation gets
//! its own reproducible sequence and no generator is ever shared between calls.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Upper bound (exclusive) of derived seeds.
pub const SEED_MODULUS: u64 = 1 << 32;

/// Salt naming the sub-operation that owns a random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Prices,
    Patterns,
    Levels,
    Trend,
    WinRate,
    Rationale,
    News,
    Review,
}

impl Stream {
    fn salt(self) -> &'static str {
        match self {
            Stream::Prices => "prices",
            Stream::Patterns => "patterns",
            Stream::Levels => "levels",
            Stream::Trend => "trend",
            Stream::WinRate => "win-rate",
            Stream::Rationale => "rationale",
            Stream::News => "news",
            Stream::Review => "review",
        }
    }
}

/// Stable hash of `symbol` and `salt`, reduced modulo [`SEED_MODULUS`].
pub fn seed_for(symbol: &str, salt: Stream) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(symbol.as_bytes());
    hasher.update([0u8]);
    hasher.update(salt.salt().as_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head) % SEED_MODULUS
}

/// A fresh generator for the given symbol stream.
pub fn rng_for(symbol: &str, salt: Stream) -> StdRng {
    StdRng::seed_from_u64(seed_for(symbol, salt))
}
