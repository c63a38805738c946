//! Transaction structure per Chainlet

use crate::MAX_PARTY_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trasferimento semplice tra due parti
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Mittente
    pub sender: String,
    /// Destinatario
    pub receiver: String,
    /// Importo (nessun vincolo di segno)
    pub amount: f64,
    /// Timestamp Unix di inserimento nel block
    pub created_at: u64,
}

impl Transaction {
    /// Crea nuova transazione con timestamp corrente
    pub fn new(sender: &str, receiver: &str, amount: f64) -> Self {
        Self::with_timestamp(sender, receiver, amount, crate::current_timestamp())
    }

    /// Crea transazione con timestamp esplicito
    pub fn with_timestamp(sender: &str, receiver: &str, amount: f64, created_at: u64) -> Self {
        Self {
            sender: clip_party(sender),
            receiver: clip_party(receiver),
            amount,
            created_at,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({:.2} BTC)", self.sender, self.receiver, self.amount)
    }
}

/// Tronca un nome a MAX_PARTY_LENGTH byte senza spezzare caratteri UTF-8
fn clip_party(name: &str) -> String {
    if name.len() <= MAX_PARTY_LENGTH {
        return name.to_string();
    }

    let mut end = MAX_PARTY_LENGTH;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}
