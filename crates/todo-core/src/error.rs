//! Error types for todo lists
//!
//! The `Display` text of each variant is the message shown to the user in
//! the flash slot, so handlers can forward errors without rewording them.

use crate::types::{ListId, TodoId};

/// What a length-checked name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSubject {
    /// A list name
    List,
    /// A todo name
    Todo,
}

/// Main domain error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    /// Name shorter than 1 or longer than 100 characters
    #[error("{}", invalid_length_message(*subject))]
    InvalidLength {
        /// Which kind of name was rejected
        subject: NameSubject,
    },

    /// Another list already has this name
    #[error("List name must be unique.")]
    DuplicateName,

    /// No list with this id in the session
    #[error("The specified list was not found.")]
    ListNotFound(ListId),

    /// No todo with this id in the list
    #[error("The specified todo was not found.")]
    TodoNotFound {
        /// Owning list
        list: ListId,
        /// Missing todo
        todo: TodoId,
    },
}

fn invalid_length_message(subject: NameSubject) -> &'static str {
    match subject {
        NameSubject::List => "List name must be between 1 and 100 characters.",
        NameSubject::Todo => "Todo must be between 1 and 100 characters.",
    }
}

impl TodoError {
    /// Check if error came from input validation
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidLength { .. } | Self::DuplicateName)
    }

    /// Check if error is a failed lookup
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound(_) | Self::TodoNotFound { .. })
    }
}

/// Result alias for domain operations
pub type TodoResult<T> = Result<T, TodoError>;
