use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// A row that can live in a [`Table`]: cloneable and addressable by a string key.
pub trait Record: Clone + Send + Sync + 'static {
    fn key(&self) -> &str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{table} already contains a record with key {key}")]
    DuplicateKey { table: &'static str, key: String },
}

/// In-memory entity store for one record type.
///
/// Rows keep insertion order, so every read returns them in a stable order.
/// All writes go through one `RwLock`; `insert_with` lets a caller compute the
/// new row (generated IDs, counters) from the current rows while that lock is
/// held, which serialises scan-then-insert patterns per table.
/// What `Table::modify` does with the row once the change has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Keep,
    Remove,
}

pub struct Table<T: Record> {
    name: &'static str,
    rows: RwLock<Vec<T>>,
}

impl<T: Record> Table<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_rows(name, Vec::new())
    }

    pub fn with_rows(name: &'static str, rows: Vec<T>) -> Self {
        Self {
            name,
            rows: RwLock::new(rows),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        self.rows.read().await.iter().find(|row| row.key() == key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.rows.read().await.iter().any(|row| row.key() == key)
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn first<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().find(|row| predicate(row)).cloned()
    }

    pub async fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().filter(|row| predicate(row)).count()
    }

    pub async fn insert(&self, row: T) -> Result<T, StoreError> {
        self.insert_with(|_| Ok::<T, StoreError>(row)).await
    }

    /// Builds a row from the current contents and appends it, all under the write lock.
    pub async fn insert_with<F, E>(&self, build: F) -> Result<T, E>
    where
        F: FnOnce(&[T]) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut rows = self.rows.write().await;
        let row = build(&rows)?;

        if rows.iter().any(|existing| existing.key() == row.key()) {
            return Err(StoreError::DuplicateKey {
                table: self.name,
                key: row.key().to_string(),
            }
            .into());
        }

        debug!("Inserting {} into {}", row.key(), self.name);
        rows.push(row.clone());
        Ok(row)
    }

    /// Applies `change` to the row with `key` and returns the updated copy.
    pub async fn update<F>(&self, key: &str, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|row| row.key() == key)?;
        change(row);
        Some(row.clone())
    }

    /// Runs `change` on the row with `key` and keeps or deletes it, all under the
    /// write lock. Returns `None` when no row has `key`, otherwise the row as
    /// `change` left it together with the action taken.
    pub async fn modify<F, E>(&self, key: &str, change: F) -> Option<Result<(T, RowAction), E>>
    where
        F: FnOnce(&mut T) -> Result<RowAction, E>,
    {
        let mut rows = self.rows.write().await;
        let index = rows.iter().position(|row| row.key() == key)?;

        let action = match change(&mut rows[index]) {
            Ok(action) => action,
            Err(err) => return Some(Err(err)),
        };

        let row = match action {
            RowAction::Keep => rows[index].clone(),
            RowAction::Remove => {
                debug!("Removing {} from {}", key, self.name);
                rows.remove(index)
            }
        };
        Some(Ok((row, action)))
    }

    pub async fn remove(&self, key: &str) -> Option<T> {
        let mut rows = self.rows.write().await;
        let index = rows.iter().position(|row| row.key() == key)?;
        debug!("Removing {} from {}", key, self.name);
        Some(rows.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}
