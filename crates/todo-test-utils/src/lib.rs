//! Testing utilities for the todo lists workspace
//!
//! Shared fixtures, session helpers and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use todo_core::{ListId, Lists, TodoId, MAX_NAME_LEN};
use todo_session::{CookieSigner, SessionId, SessionStore, DEFAULT_TTL, SESSION_COOKIE};

/// Secret used by every test store, so cookies can be built by hand
pub const TEST_SECRET: &[u8] = b"test-secret";

/// Todo fixture: name and completion flag
pub type TodoSpec<'a> = (&'a str, bool);

/// Build lists from `(list name, [(todo name, completed)])` pairs
pub fn lists_with(fixture: &[(&str, &[TodoSpec<'_>])]) -> Lists {
    let mut lists = Lists::new();
    for (name, todos) in fixture {
        let list_id = lists.create_list(name).unwrap().id;
        for (todo, completed) in *todos {
            let todo_id = lists.create_todo(list_id, todo).unwrap().id;
            lists.set_todo_completed(list_id, todo_id, *completed).unwrap();
        }
    }
    lists
}

/// "Groceries" with Milk (done) and Eggs (open)
pub fn groceries() -> Lists {
    lists_with(&[("Groceries", &[("Milk", true), ("Eggs", false)])])
}

/// Id of the list with this name
pub fn list_id(lists: &Lists, name: &str) -> ListId {
    lists.iter().find(|list| list.name == name).unwrap().id
}

/// Id of the todo with this name in the given list
pub fn todo_id(lists: &Lists, list: ListId, name: &str) -> TodoId {
    lists
        .find_list(list)
        .unwrap()
        .todos
        .iter()
        .find(|todo| todo.name == name)
        .unwrap()
        .id
}

/// Store signed with [`TEST_SECRET`] and the default time to live
pub fn session_store() -> SessionStore {
    SessionStore::new(CookieSigner::from_secret(TEST_SECRET), DEFAULT_TTL)
}

/// Commit a session holding `lists` and return its id and `Cookie` header value
pub fn seed_session(store: &SessionStore, lists: Lists) -> (SessionId, String) {
    let mut session = store.open(None);
    *session.lists_mut() = lists;
    let id = session.id();
    store.commit(session);
    (id, format!("{SESSION_COOKIE}={}", store.cookie_value(id)))
}

/// Names whose stripped length is within the accepted range
pub fn valid_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[a-zA-Z0-9][a-zA-Z0-9 ]{{0,{}}}", MAX_NAME_LEN - 2))
        .unwrap()
        .prop_map(|name| name.trim().to_string())
}

/// Names that are too long even after stripping
pub fn overlong_name() -> impl Strategy<Value = String> {
    (MAX_NAME_LEN + 1..MAX_NAME_LEN * 3).prop_map(|len| "x".repeat(len))
}

/// Whitespace-only names, empty after stripping
pub fn blank_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t\n]{0,8}").unwrap()
}
