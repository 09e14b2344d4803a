//! Persisted, ordered transaction list.
//!
//! The whole list is kept as one JSON array under a single key of a
//! [`KeyValueStore`]. Every operation reads the full list, and every mutation
//! writes it back in full. There is no locking: two writers interleaving their
//! read-modify-write cycles lose one of the updates.

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::transaction::Transaction;
use log::{debug, warn};

/// Key under which the serialized transaction list is stored.
pub const STORAGE_KEY: &str = "bookkeeping_transactions";

/// Transaction repository over a key-value backend.
pub struct TransactionStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Creates a store using the default [`STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Creates a store that keeps its list under a custom key.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        TransactionStore {
            backend,
            key: key.into(),
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns all transactions in insertion order.
    ///
    /// Missing or unreadable stored data yields an empty list.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let stored = self.backend.get(&self.key)?;
        Ok(stored.map(|raw| self.decode(&raw)).unwrap_or_default())
    }

    /// Looks up a transaction by id.
    pub fn get(&self, id: &str) -> Result<Option<Transaction>> {
        Ok(self.transactions()?.into_iter().find(|tx| tx.id == id))
    }

    /// Number of stored transactions.
    pub fn len(&self) -> Result<usize> {
        Ok(self.transactions()?.len())
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Inserts a transaction, or replaces the one with the same id in place.
    pub fn save(&mut self, transaction: Transaction) -> Result<()> {
        self.save_all(std::iter::once(transaction)).map(|_| ())
    }

    /// Upserts many transactions with a single read and write.
    ///
    /// Returns how many of them replaced an existing entry.
    pub fn save_all<I>(&mut self, transactions: I) -> Result<usize>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut stored = self.transactions()?;
        let mut replaced = 0;

        for tx in transactions {
            match stored.iter_mut().find(|existing| existing.id == tx.id) {
                Some(existing) => {
                    debug!("Replacing transaction {}", tx.id);
                    *existing = tx;
                    replaced += 1;
                }
                None => {
                    debug!("Appending transaction {}", tx.id);
                    stored.push(tx);
                }
            }
        }

        self.write(&stored)?;
        Ok(replaced)
    }

    /// Removes the transaction with `id`.
    ///
    /// Returns `false`, and leaves storage untouched, when no such id exists.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut stored = self.transactions()?;
        let before = stored.len();
        stored.retain(|tx| tx.id != id);

        if stored.len() == before {
            debug!("Delete of unknown transaction {} ignored", id);
            return Ok(false);
        }

        self.write(&stored)?;
        debug!("Deleted transaction {}", id);
        Ok(true)
    }

    /// Clears the backend, dropping every transaction.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()
    }

    fn decode(&self, raw: &str) -> Vec<Transaction> {
        match serde_json::from_str(raw) {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!(
                    "Stored transactions under '{}' are unreadable, starting empty: {}",
                    self.key, e
                );
                Vec::new()
            }
        }
    }

    fn write(&mut self, transactions: &[Transaction]) -> Result<()> {
        let encoded = serde_json::to_string(transactions)?;
        self.backend.set(&self.key, &encoded)
    }
}
