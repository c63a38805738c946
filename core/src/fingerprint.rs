//! Fingerprint dei block (checksum DJB2, non crittografico)

use crate::FINGERPRINT_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seed iniziale dell'algoritmo DJB2
const DJB2_SEED: u64 = 5381;

/// Impronta testuale di un block, usata solo per il collegamento
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint sentinella del genesis ("nessun predecessore")
    pub fn sentinel() -> Self {
        Self("0".repeat(FINGERPRINT_LENGTH))
    }

    /// Verifica se è il fingerprint sentinella
    pub fn is_sentinel(&self) -> bool {
        self.0.len() == FINGERPRINT_LENGTH && self.0.bytes().all(|b| b == b'0')
    }

    /// Calcola il fingerprint da (index, previous_fingerprint, created_at).
    ///
    /// I tre campi vengono concatenati in forma testuale e passati a DJB2;
    /// il risultato è reso come 16 cifre esadecimali minuscole.
    pub fn compute(index: u64, previous: &Fingerprint, created_at: u64) -> Self {
        let data = format!("{}{}{}", index, previous.0, created_at);
        Self(format!(
            "{:0width$x}",
            djb2(data.as_bytes()),
            width = FINGERPRINT_LENGTH
        ))
    }

    /// Rappresentazione testuale
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// DJB2: h = h * 33 + byte, con overflow modulare a 64 bit
pub fn djb2(data: &[u8]) -> u64 {
    data.iter().fold(DJB2_SEED, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(djb2(b"a"), 177_670);
    }

    #[test]
    fn test_sentinel() {
        let sentinel = Fingerprint::sentinel();
        assert_eq!(sentinel.as_str().len(), FINGERPRINT_LENGTH);
        assert!(sentinel.is_sentinel());
        assert!(!Fingerprint::from("0000").is_sentinel());
    }

    #[test]
    fn test_compute_vectors() {
        let genesis = Fingerprint::compute(0, &Fingerprint::sentinel(), 1_700_000_000);
        assert_eq!(genesis.as_str(), "529bea90d05a991d");

        let next = Fingerprint::compute(1, &genesis, 1_700_000_060);
        assert_eq!(next.as_str(), "58f88ff2f87e46a6");
    }

    #[test]
    fn test_compute_is_deterministic() {
        let previous = Fingerprint::from("abcdef0123456789");
        let a = Fingerprint::compute(7, &previous, 42);
        let b = Fingerprint::compute(7, &previous, 42);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), FINGERPRINT_LENGTH);

        assert_ne!(a, Fingerprint::compute(8, &previous, 42));
        assert_ne!(a, Fingerprint::compute(7, &previous, 43));
    }
}
