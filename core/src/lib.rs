//! Chainlet Core - Strutture dati fondamentali della chain dimostrativa
//!
//! Il fingerprint dei block è un checksum DJB2, NON un hash crittografico:
//! serve solo a collegare i block tra loro e non va riusato per nulla che
//! riguardi la sicurezza.

use std::time::{SystemTime, UNIX_EPOCH};

// Re-export dei moduli principali
pub mod block;
pub mod chain;
pub mod fingerprint;
pub mod shared;
pub mod storage;
pub mod transaction;

// Re-export dei tipi principali
pub use block::{Block, BlockTemplate};
pub use chain::{Chain, ChainConfig, ChainError, ChainStats, PendingBlock, Verification};
pub use fingerprint::Fingerprint;
pub use shared::SharedChain;
pub use storage::{ChainSnapshot, SnapshotFormat, StorageError};
pub use transaction::Transaction;

/// Numero massimo di transazioni per block
pub const MAX_TRANSACTIONS: usize = 10;

/// Lunghezza del fingerprint in caratteri esadecimali
pub const FINGERPRINT_LENGTH: usize = 16;

/// Lunghezza massima (in byte) di mittente e destinatario
pub const MAX_PARTY_LENGTH: usize = 63;

/// Timestamp corrente in secondi Unix
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
