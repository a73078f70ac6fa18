//! Owned in-memory tables backing the default repositories.

use super::sequence::IdSequence;

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Row type addressable by a numeric identifier.
pub trait Keyed {
    type Key: Copy + PartialEq;

    fn key(&self) -> Self::Key;
    fn ordinal(&self) -> u32;
}

/// Most-recent-first collection that owns its identifier sequence.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    sequence: IdSequence,
}

impl<T: Keyed + Clone> Table<T> {
    /// Rows are kept in the given order; new ids continue after the highest existing one.
    pub fn from_rows(rows: Vec<T>) -> Self {
        let highest = rows.iter().map(Keyed::ordinal).max().unwrap_or(0);
        Self {
            rows,
            sequence: IdSequence::after(highest),
        }
    }

    pub fn allocate(&self) -> u32 {
        self.sequence.next_value()
    }

    pub fn prepend(&mut self, row: T) -> Result<(), RepositoryError> {
        if self.get(row.key()).is_some() {
            return Err(RepositoryError::Conflict);
        }
        self.rows.insert(0, row);
        Ok(())
    }

    pub fn push(&mut self, row: T) -> Result<(), RepositoryError> {
        if self.get(row.key()).is_some() {
            return Err(RepositoryError::Conflict);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.rows.iter().find(|row| row.key() == key)
    }

    pub fn get_mut(&mut self, key: T::Key) -> Option<&mut T> {
        self.rows.iter_mut().find(|row| row.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Keyed + Clone> Default for Table<T> {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}
