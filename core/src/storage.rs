//! Snapshot della chain su file (JSON o bincode)

use crate::{Block, Chain, ChainConfig, ChainStats};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Formato del file di snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// JSON leggibile, con statistiche incluse
    Json,
    /// Binario compatto (bincode)
    Binary,
}

/// Contenuto serializzato di una chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Configurazione con cui la chain è stata costruita
    pub config: ChainConfig,
    /// Tutti i block, dal genesis al tip
    pub blocks: Vec<Block>,
    /// Statistiche al momento dell'export (solo informative)
    pub stats: ChainStats,
}

impl SnapshotFormat {
    /// Sceglie il formato dall'estensione: `.json` => JSON, altrimenti binario
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Binary,
        }
    }
}

impl ChainSnapshot {
    /// Cattura lo stato corrente della chain
    pub fn capture(chain: &Chain) -> Self {
        Self {
            config: *chain.config(),
            blocks: chain.iter().cloned().collect(),
            stats: chain.stats(),
        }
    }

    /// Ricostruisce la chain controllandone la struttura.
    ///
    /// I fingerprint NON vengono controllati qui, nemmeno la sentinella del
    /// genesis: una chain manomessa si carica comunque e `Chain::verify` la
    /// segnala.
    pub fn into_chain(self) -> Result<Chain, StorageError> {
        if self.blocks.is_empty() {
            return Err(StorageError::InvalidData(
                "Snapshot contains no blocks".to_string(),
            ));
        }

        for (position, block) in self.blocks.iter().enumerate() {
            if block.index != position as u64 {
                return Err(StorageError::InvalidData(format!(
                    "Block at position {} has index {}",
                    position, block.index
                )));
            }

            if block.transactions.len() > self.config.max_transactions {
                return Err(StorageError::InvalidData(format!(
                    "Block #{} holds {} transactions, capacity is {}",
                    block.index,
                    block.transactions.len(),
                    self.config.max_transactions
                )));
            }
        }

        Ok(Chain::from_parts(self.config, self.blocks))
    }

    /// Serializza nel formato richiesto.
    ///
    /// JSON non rappresenta NaN e infiniti: gli importi non finiti sono
    /// accettati solo dal formato binario.
    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, StorageError> {
        match format {
            SnapshotFormat::Json => {
                self.ensure_finite_amounts()?;
                serde_json::to_vec_pretty(self)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            }
            SnapshotFormat::Binary => {
                bincode::serialize(self).map_err(|e| StorageError::Serialization(e.to_string()))
            }
        }
    }

    fn ensure_finite_amounts(&self) -> Result<(), StorageError> {
        for block in &self.blocks {
            for (position, tx) in block.transactions.iter().enumerate() {
                if !tx.amount.is_finite() {
                    return Err(StorageError::Serialization(format!(
                        "Block #{} transaction {} has non-finite amount {}, \
                         use the binary format",
                        block.index, position, tx.amount
                    )));
                }
            }
        }
        Ok(())
    }

    /// Deserializza dal formato richiesto
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, StorageError> {
        match format {
            SnapshotFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| StorageError::Deserialization(e.to_string())),
            SnapshotFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| StorageError::Deserialization(e.to_string())),
        }
    }
}

/// Salva la chain su file
pub fn save<P: AsRef<Path>>(
    chain: &Chain,
    path: P,
    format: SnapshotFormat,
) -> Result<(), StorageError> {
    let bytes = ChainSnapshot::capture(chain).encode(format)?;

    fs::write(path.as_ref(), bytes).map_err(|e| StorageError::Io(e.to_string()))?;

    log::info!(
        "Chain with {} blocks saved to {}",
        chain.block_count(),
        path.as_ref().display()
    );
    Ok(())
}

/// Carica una chain da file
pub fn load<P: AsRef<Path>>(path: P, format: SnapshotFormat) -> Result<Chain, StorageError> {
    let bytes = fs::read(path.as_ref()).map_err(|e| StorageError::Io(e.to_string()))?;
    let chain = ChainSnapshot::decode(&bytes, format)?.into_chain()?;

    log::debug!(
        "Loaded chain with {} blocks from {}",
        chain.block_count(),
        path.as_ref().display()
    );
    Ok(chain)
}

/// Errori dello storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
