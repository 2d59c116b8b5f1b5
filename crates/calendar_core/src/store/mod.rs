//! Persisted state stores and their composition root.
//!
//! # Responsibility
//! - Own events, settings and theme state in memory.
//! - Write each store's persisted slice before an action reports success.
//!
//! # Invariants
//! - An action either leaves memory and storage in agreement or rolls the
//!   in-memory mutation back and reports the failure.
//! - `error` holds the localized message of the last failed action until
//!   `clear_error` or the next action.
//! - `loading`/`error` are never persisted.
//!
//! # See also
//! - `storage` for the slice envelope.

use crate::messages::FailedAction;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod events;
pub mod root;
pub mod settings;
pub mod theme;

/// Version written into every slice envelope.
pub(crate) const SLICE_VERSION: u32 = 0;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store identity used in aggregate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Events,
    Settings,
    Theme,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Settings => "settings",
            Self::Theme => "theme",
        }
    }
}

/// Store action failure.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the persisted slice failed.
    Storage {
        action: FailedAction,
        source: StorageError,
    },
    /// One or more stores failed during app initialization.
    Initialization { failed: Vec<(StoreKind, StoreError)> },
    /// One or more stores failed while clearing data.
    ClearAllData { failed: Vec<(StoreKind, StoreError)> },
}

impl StoreError {
    /// Stores named by an aggregate failure; empty for single-store errors.
    pub fn failed_stores(&self) -> Vec<StoreKind> {
        match self {
            Self::Storage { .. } => Vec::new(),
            Self::Initialization { failed } | Self::ClearAllData { failed } => {
                failed.iter().map(|(kind, _)| *kind).collect()
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage { action, source } => write!(f, "{action:?} failed: {source}"),
            Self::Initialization { failed } => {
                write!(f, "app initialization failed in: {}", join_kinds(failed))
            }
            Self::ClearAllData { failed } => {
                write!(f, "clearing data failed in: {}", join_kinds(failed))
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source),
            Self::Initialization { failed } | Self::ClearAllData { failed } => failed
                .first()
                .map(|(_, err)| err as &(dyn Error + 'static)),
        }
    }
}

fn join_kinds(failed: &[(StoreKind, StoreError)]) -> String {
    failed
        .iter()
        .map(|(kind, _)| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
