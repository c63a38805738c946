//! Block e BlockTemplate structures per Chainlet

use crate::chain::ChainError;
use crate::fingerprint::Fingerprint;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block sigillato: il fingerprint è già stato calcolato
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Posizione del block nella chain (0 = genesis)
    pub index: u64,
    /// Fingerprint del block precedente
    pub previous_fingerprint: Fingerprint,
    /// Transazioni in ordine di inserimento
    pub transactions: Vec<Transaction>,
    /// Timestamp Unix di creazione
    pub created_at: u64,
    /// Fingerprint di questo block
    pub current_fingerprint: Fingerprint,
}

/// Block in costruzione, accetta transazioni fino alla capacità
#[derive(Debug, Clone)]
pub struct BlockTemplate {
    index: u64,
    previous_fingerprint: Fingerprint,
    transactions: Vec<Transaction>,
    created_at: u64,
    capacity: usize,
}

impl BlockTemplate {
    /// Crea nuovo template con timestamp corrente
    pub fn new(index: u64, previous_fingerprint: Fingerprint, capacity: usize) -> Self {
        Self::with_timestamp(index, previous_fingerprint, capacity, crate::current_timestamp())
    }

    /// Crea template con timestamp esplicito
    pub fn with_timestamp(
        index: u64,
        previous_fingerprint: Fingerprint,
        capacity: usize,
        created_at: u64,
    ) -> Self {
        Self {
            index,
            previous_fingerprint,
            transactions: Vec::new(),
            created_at,
            capacity,
        }
    }

    /// Template del genesis block
    pub fn genesis(capacity: usize) -> Self {
        Self::new(0, Fingerprint::sentinel(), capacity)
    }

    /// Aggiunge una transazione se c'è ancora spazio.
    ///
    /// Con il block pieno ritorna `CapacityExceeded` e il template resta
    /// invariato e utilizzabile.
    pub fn add_transaction(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) -> Result<&Transaction, ChainError> {
        if self.is_full() {
            log::warn!(
                "Block #{} full, rejecting {} -> {} ({:.2})",
                self.index,
                sender,
                receiver,
                amount
            );
            return Err(ChainError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.transactions
            .try_reserve(1)
            .map_err(|e| ChainError::Allocation(e.to_string()))?;

        let position = self.transactions.len();
        self.transactions.push(Transaction::new(sender, receiver, amount));
        log::debug!(
            "Transaction added to block #{}: {}",
            self.index,
            self.transactions[position]
        );

        Ok(&self.transactions[position])
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn previous_fingerprint(&self) -> &Fingerprint {
        &self.previous_fingerprint
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.transactions.len() >= self.capacity
    }

    /// Chiude il template: calcola il fingerprint una volta sola
    pub fn seal(self) -> Block {
        let current_fingerprint =
            Fingerprint::compute(self.index, &self.previous_fingerprint, self.created_at);

        Block {
            index: self.index,
            previous_fingerprint: self.previous_fingerprint,
            transactions: self.transactions,
            created_at: self.created_at,
            current_fingerprint,
        }
    }
}

impl Block {
    /// Ricalcola il fingerprint dai campi del block.
    ///
    /// Le transazioni non fanno parte dell'input.
    pub fn compute_fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(self.index, &self.previous_fingerprint, self.created_at)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Verifica se è un genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_fingerprint.is_sentinel()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== BLOCK #{} ===", self.index)?;
        writeln!(f, "Previous Fingerprint: {}", self.previous_fingerprint)?;
        writeln!(f, "Current Fingerprint:  {}", self.current_fingerprint)?;
        writeln!(f, "Timestamp:            {}", self.created_at)?;
        writeln!(f, "Transactions:         {}", self.transactions.len())?;
        for tx in &self.transactions {
            writeln!(f, "  {}", tx)?;
        }
        write!(f, "===================")
    }
}
