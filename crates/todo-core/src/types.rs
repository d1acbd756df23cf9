//! Core data model: lists, todos and their identifiers
//!
//! Identifiers are stable: a new id is one past the largest id already in
//! the containing collection, so references survive sibling deletion and
//! display reordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a list within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub u64);

/// Identifier of a todo within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

macro_rules! id_impls {
    ($ty:ident) => {
        impl $ty {
            /// First identifier handed out in an empty collection
            pub const FIRST: Self = Self(1);

            /// Identifier following `self`
            #[inline]
            #[must_use]
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $ty {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

id_impls!(ListId);
id_impls!(TodoId);

/// A named item with a completion flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable id within the owning list
    pub id: TodoId,
    /// Display name (already stripped and validated)
    pub name: String,
    /// Completion flag
    pub completed: bool,
}

impl Todo {
    /// Create an incomplete todo
    #[inline]
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Stable id within the session
    pub id: ListId,
    /// Display name, unique among the session's lists
    pub name: String,
    /// Todos in insertion order
    pub todos: Vec<Todo>,
}

impl List {
    /// Create an empty list
    #[inline]
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Look up a todo by id
    #[must_use]
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Look up a todo by id for mutation
    pub fn todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Id the next appended todo will receive
    #[must_use]
    pub fn next_todo_id(&self) -> TodoId {
        self.todos
            .iter()
            .map(|todo| todo.id)
            .max()
            .map_or(TodoId::FIRST, TodoId::next)
    }
}

/// All lists belonging to one session, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lists {
    pub(crate) items: Vec<List>,
}

impl Lists {
    /// Create an empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no lists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, List> {
        self.items.iter()
    }

    /// Id the next created list will receive
    #[must_use]
    pub fn next_list_id(&self) -> ListId {
        self.items
            .iter()
            .map(|list| list.id)
            .max()
            .map_or(ListId::FIRST, ListId::next)
    }
}

impl<'a> IntoIterator for &'a Lists {
    type Item = &'a List;
    type IntoIter = std::slice::Iter<'a, List>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_from_path_segments() {
        assert_eq!("7".parse::<ListId>().unwrap(), ListId(7));
        assert_eq!("12".parse::<TodoId>().unwrap(), TodoId(12));
        assert!("abc".parse::<ListId>().is_err());
        assert!("-1".parse::<TodoId>().is_err());
    }

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(ListId(3).to_string(), "3");
        assert_eq!(format!("/lists/{}/todos/{}", ListId(1), TodoId(2)), "/lists/1/todos/2");
    }

    #[test]
    fn next_todo_id_is_one_past_max() {
        let mut list = List::new(ListId(1), "Chores");
        assert_eq!(list.next_todo_id(), TodoId(1));

        list.todos.push(Todo::new(TodoId(4), "a"));
        list.todos.push(Todo::new(TodoId(2), "b"));
        assert_eq!(list.next_todo_id(), TodoId(5));
    }

    #[test]
    fn next_list_id_starts_at_one() {
        let lists = Lists::new();
        assert_eq!(lists.next_list_id(), ListId::FIRST);
    }
}
