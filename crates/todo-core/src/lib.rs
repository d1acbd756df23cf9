//! Todo Core
//!
//! Lists, todos and the rules around them:
//! - **Lists**: the per-session collection with lookup and mutation operations
//! - **Validation**: name length and list-name uniqueness
//! - **Ordering**: incomplete-first display order and progress labels
//!
//! # Example
//!
//! ```rust
//! use todo_core::{ordering, Lists};
//!
//! let mut lists = Lists::new();
//! let id = lists.create_list("Groceries").unwrap().id;
//! let milk = lists.create_todo(id, "Milk").unwrap().id;
//! lists.create_todo(id, "Eggs").unwrap();
//! lists.set_todo_completed(id, milk, true).unwrap();
//!
//! let list = lists.find_list(id).unwrap();
//! assert_eq!(ordering::todos_done_label(list), "1 / 2");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod ordering;
pub mod repository;
pub mod types;
pub mod validation;

// Re-exports
pub use error::{NameSubject, TodoError, TodoResult};
pub use types::{List, ListId, Lists, Todo, TodoId};
pub use validation::{validate_list_name, validate_list_rename, validate_todo_name, MAX_NAME_LEN, MIN_NAME_LEN};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
