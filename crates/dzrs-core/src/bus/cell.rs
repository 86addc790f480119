//! Shared state cells
//!
//! A [`StateCell`] is a small piece of state read and written by several
//! independent surfaces. Clones share the value; there is no per-handle
//! caching.

use std::sync::{Arc, PoisonError, RwLock};

/// Lifecycle of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
enum CellState<T> {
    /// Never written, holds the default
    Uninitialized(T),
    /// Written at least once
    Live(T),
}

impl<T> CellState<T> {
    fn value(&self) -> &T {
        match self {
            Self::Uninitialized(v) | Self::Live(v) => v,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StateCell<T> {
    state: Arc<RwLock<CellState<T>>>,
}

impl<T: Clone> StateCell<T> {
    /// Create a cell holding `default` until its first write
    pub fn new(default: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(CellState::Uninitialized(default))),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .value()
            .clone()
    }

    /// Replace the value, returning the previous one
    pub fn set(&self, value: T) -> T {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *state, CellState::Live(value));
        match previous {
            CellState::Uninitialized(v) | CellState::Live(v) => v,
        }
    }

    /// Check if the cell has been written
    pub fn is_live(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            CellState::Live(_)
        )
    }
}
