//! Chain store: sequenza ordinata di block a partire dal genesis

use crate::block::{Block, BlockTemplate};
use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

/// Configurazione della chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Numero massimo di transazioni per block
    pub max_transactions: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_transactions: crate::MAX_TRANSACTIONS,
        }
    }
}

/// Chain completa: possiede tutti i block, dal genesis al tip
#[derive(Debug, Clone)]
pub struct Chain {
    config: ChainConfig,
    // Mai vuoto: il primo elemento è sempre il genesis
    blocks: Vec<Block>,
}

/// Block in costruzione legato alla chain che lo riceverà.
///
/// Il prestito mutabile garantisce che index e fingerprint precedente
/// restino quelli del tip finché il block non viene aggiunto.
pub struct PendingBlock<'a> {
    chain: &'a mut Chain,
    template: BlockTemplate,
}

/// Esito della verifica di integrità
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Tutti i collegamenti sono coerenti
    Valid { blocks: usize },
    /// Primo block il cui previous_fingerprint non coincide col predecessore
    Broken {
        index: u64,
        expected: Fingerprint,
        found: Fingerprint,
    },
}

/// Statistiche della chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    /// Numero totale di block (genesis incluso)
    pub total_blocks: u64,
    /// Transazioni in tutti i block
    pub total_transactions: u64,
    /// Index del tip
    pub tip_index: u64,
    /// Fingerprint del tip
    pub tip_fingerprint: Fingerprint,
    /// Secondi trascorsi dalla creazione del tip
    pub age_seconds: u64,
}

impl Chain {
    /// Crea una chain con il solo genesis block
    pub fn new() -> Result<Self, ChainError> {
        Self::with_config(ChainConfig::default())
    }

    /// Crea una chain con configurazione esplicita
    pub fn with_config(config: ChainConfig) -> Result<Self, ChainError> {
        let mut blocks = Vec::new();
        blocks
            .try_reserve(1)
            .map_err(|e| ChainError::Allocation(e.to_string()))?;

        let genesis = BlockTemplate::genesis(config.max_transactions).seal();
        log::info!("Genesis block created: {}", genesis.current_fingerprint);
        blocks.push(genesis);

        Ok(Self { config, blocks })
    }

    /// Ricostruisce una chain da block già sigillati (usato dallo storage)
    pub(crate) fn from_parts(config: ChainConfig, blocks: Vec<Block>) -> Self {
        Self { config, blocks }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// Ultimo block della chain
    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Numero di block, genesis incluso
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Block per index
    pub fn get(&self, index: u64) -> Option<&Block> {
        let position = usize::try_from(index).ok()?;
        self.blocks.get(position)
    }

    /// Accesso mutabile a un block già sigillato.
    ///
    /// Modificare i campi NON ricalcola nulla: serve per diagnostica e
    /// per simulare manomissioni, che `verify` deve poi rilevare.
    pub fn block_mut(&mut self, index: u64) -> Option<&mut Block> {
        let position = usize::try_from(index).ok()?;
        self.blocks.get_mut(position)
    }

    /// Ultimi `count` block, in ordine dal più vecchio
    pub fn latest(&self, count: usize) -> &[Block] {
        let start = self.blocks.len().saturating_sub(count);
        &self.blocks[start..]
    }

    /// Iteratore lazy dal genesis al tip
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Apre un nuovo block collegato al tip corrente
    pub fn begin_block(&mut self) -> Result<PendingBlock<'_>, ChainError> {
        let tip = self.tip();
        let index = tip
            .index
            .checked_add(1)
            .ok_or_else(|| ChainError::Allocation("block index space exhausted".to_string()))?;

        let template = BlockTemplate::new(
            index,
            tip.current_fingerprint.clone(),
            self.config.max_transactions,
        );

        Ok(PendingBlock {
            chain: self,
            template,
        })
    }

    /// Aggiunge un block con le transazioni indicate.
    ///
    /// Le transazioni oltre la capacità vengono scartate (con un warning),
    /// il block viene comunque sigillato e collegato. Solo un errore di
    /// allocazione interrompe l'operazione.
    pub fn append_block(&mut self, seed: &[(&str, &str, f64)]) -> Result<&Block, ChainError> {
        let mut pending = self.begin_block()?;

        let mut rejected = 0;
        for (sender, receiver, amount) in seed {
            match pending.add_transaction(sender, receiver, *amount) {
                Ok(()) => {}
                Err(ChainError::CapacityExceeded { .. }) => rejected += 1,
                Err(e) => return Err(e),
            }
        }

        if rejected > 0 {
            log::warn!(
                "Block #{} full: {} of {} seeded transactions rejected",
                pending.index(),
                rejected,
                seed.len()
            );
        }

        pending.commit()
    }

    /// Verifica che il genesis abbia il fingerprint sentinella e che ogni
    /// block punti al fingerprint del predecessore
    pub fn verify(&self) -> Verification {
        let genesis = self.genesis();
        if !genesis.previous_fingerprint.is_sentinel() {
            log::warn!("Genesis block #{} has no sentinel fingerprint", genesis.index);
            return Verification::Broken {
                index: genesis.index,
                expected: Fingerprint::sentinel(),
                found: genesis.previous_fingerprint.clone(),
            };
        }

        for pair in self.blocks.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);

            if next.previous_fingerprint != current.current_fingerprint {
                log::warn!("Block #{} fingerprint mismatch", next.index);
                return Verification::Broken {
                    index: next.index,
                    expected: current.current_fingerprint.clone(),
                    found: next.previous_fingerprint.clone(),
                };
            }
        }

        Verification::Valid {
            blocks: self.blocks.len(),
        }
    }

    /// Statistiche della chain
    pub fn stats(&self) -> ChainStats {
        let tip = self.tip();

        ChainStats {
            total_blocks: self.blocks.len() as u64,
            total_transactions: self
                .blocks
                .iter()
                .map(|block| block.transactions.len() as u64)
                .sum(),
            tip_index: tip.index,
            tip_fingerprint: tip.current_fingerprint.clone(),
            age_seconds: crate::current_timestamp().saturating_sub(tip.created_at),
        }
    }

    /// Rilascia tutti i block in ordine e ritorna quanti ne sono stati liberati
    pub fn teardown(self) -> usize {
        let mut released = 0;
        for block in self.blocks {
            log::trace!("Releasing block #{}", block.index);
            drop(block);
            released += 1;
        }

        log::debug!("Chain torn down, {} blocks released", released);
        released
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl<'a> PendingBlock<'a> {
    /// Aggiunge una transazione al block in costruzione
    pub fn add_transaction(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) -> Result<(), ChainError> {
        self.template.add_transaction(sender, receiver, amount)?;
        Ok(())
    }

    pub fn index(&self) -> u64 {
        self.template.index()
    }

    pub fn transaction_count(&self) -> usize {
        self.template.transaction_count()
    }

    /// Sigilla il block e lo collega come nuovo tip
    pub fn commit(self) -> Result<&'a Block, ChainError> {
        let PendingBlock { chain, template } = self;

        chain
            .blocks
            .try_reserve(1)
            .map_err(|e| ChainError::Allocation(e.to_string()))?;

        let block = template.seal();
        log::info!(
            "Block #{} added with {} transactions",
            block.index,
            block.transactions.len()
        );

        let position = chain.blocks.len();
        chain.blocks.push(block);
        Ok(&chain.blocks[position])
    }
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid { .. })
    }

    /// Index del primo block con collegamento rotto
    pub fn offending_index(&self) -> Option<u64> {
        match self {
            Verification::Valid { .. } => None,
            Verification::Broken { index, .. } => Some(*index),
        }
    }
}

/// Errori della chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("Block full: capacity of {capacity} transactions reached")]
    CapacityExceeded { capacity: usize },

    #[error("Allocation failure: {0}")]
    Allocation(String),
}
