//! Accesso condiviso alla chain da più thread

use crate::{Block, Chain, ChainError, ChainStats, Verification};
use std::sync::{Arc, PoisonError, RwLock};

/// Chain protetta da RwLock, clonabile tra thread
#[derive(Debug, Clone)]
pub struct SharedChain {
    inner: Arc<RwLock<Chain>>,
}

impl SharedChain {
    /// Avvolge una chain esistente
    pub fn new(chain: Chain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Aggiunge un block e ne ritorna una copia
    pub fn append_block(&self, seed: &[(&str, &str, f64)]) -> Result<Block, ChainError> {
        self.update(|chain| chain.append_block(seed).cloned())
    }

    /// Esegue una modifica con accesso esclusivo
    pub fn update<F, R>(&self, updater: F) -> Result<R, ChainError>
    where
        F: FnOnce(&mut Chain) -> Result<R, ChainError>,
    {
        let mut chain = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        updater(&mut chain)
    }

    pub fn verify(&self) -> Verification {
        self.read().verify()
    }

    pub fn stats(&self) -> ChainStats {
        self.read().stats()
    }

    /// Copia della chain corrente
    pub fn snapshot(&self) -> Chain {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Chain> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
