//! Name validation for lists and todos
//!
//! Names are measured in characters after stripping surrounding
//! whitespace. List names must also be unique within the session.

use crate::error::{NameSubject, TodoError, TodoResult};
use crate::types::{List, ListId};

/// Shortest accepted name, in characters
pub const MIN_NAME_LEN: usize = 1;

/// Longest accepted name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Strip leading and trailing whitespace from submitted input
#[inline]
#[must_use]
pub fn normalize_name(raw: &str) -> &str {
    raw.trim()
}

fn check_length(name: &str, subject: NameSubject) -> TodoResult<()> {
    let len = name.chars().count();
    if (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        Ok(())
    } else {
        Err(TodoError::InvalidLength { subject })
    }
}

/// Validate a new list name against the existing lists
///
/// # Errors
/// - `TodoError::InvalidLength` if the name is empty or too long
/// - `TodoError::DuplicateName` if any existing list has exactly this name
pub fn validate_list_name<'a, I>(name: &str, existing: I) -> TodoResult<()>
where
    I: IntoIterator<Item = &'a List>,
{
    validate_list_rename(name, existing, None)
}

/// Validate a list name, ignoring the list identified by `renaming`
///
/// Renaming a list to its current name is accepted.
///
/// # Errors
/// Same as [`validate_list_name`].
pub fn validate_list_rename<'a, I>(name: &str, existing: I, renaming: Option<ListId>) -> TodoResult<()>
where
    I: IntoIterator<Item = &'a List>,
{
    check_length(name, NameSubject::List)?;

    let taken = existing
        .into_iter()
        .filter(|list| Some(list.id) != renaming)
        .any(|list| list.name == name);

    if taken {
        return Err(TodoError::DuplicateName);
    }
    Ok(())
}

/// Validate a todo name
///
/// # Errors
/// - `TodoError::InvalidLength` if the name is empty or too long
pub fn validate_todo_name(name: &str) -> TodoResult<()> {
    check_length(name, NameSubject::Todo)
}
