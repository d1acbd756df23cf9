//! Session store behaviour across simulated requests

use pretty_assertions::assert_eq;
use todo_session::{CookieSigner, SessionStore, DEFAULT_TTL, SESSION_COOKIE};
use todo_test_utils::{groceries, list_id, seed_session, session_store, TEST_SECRET};

fn cookie_value(header: &str) -> &str {
    header
        .strip_prefix(&format!("{SESSION_COOKIE}="))
        .map(|rest| rest.split(';').next().unwrap())
        .unwrap()
}

#[test]
fn flash_survives_exactly_one_render() {
    let store = session_store();

    // Request 1: mutate and redirect
    let mut session = store.open(None);
    session.lists_mut().create_list("Groceries").unwrap();
    session.flash_mut().set_success("The list has been created.");
    let set_cookie = store.commit(session).unwrap();
    let cookie = cookie_value(&set_cookie).to_string();

    // Request 2: render takes the flash
    let mut session = store.open(Some(&cookie));
    let flash = session.take_flash();
    assert_eq!(flash.success.as_deref(), Some("The list has been created."));
    store.commit(session);

    // Request 3: nothing left
    let mut session = store.open(Some(&cookie));
    assert!(session.take_flash().is_empty());
    assert_eq!(session.lists().len(), 1);
}

#[test]
fn seeded_session_resumes_with_lists() {
    let store = session_store();
    let (id, header) = seed_session(&store, groceries());
    let cookie = header.split_once('=').unwrap().1;

    let session = store.open(Some(cookie));
    assert_eq!(session.id(), id);
    assert!(session.lists().find_list(list_id(session.lists(), "Groceries")).is_ok());
}

#[test]
fn cookie_from_another_secret_starts_fresh() {
    let store = session_store();
    let (_, header) = seed_session(&store, groceries());
    let cookie = header.split_once('=').unwrap().1;

    let other = SessionStore::new(CookieSigner::from_secret(b"other"), DEFAULT_TTL);
    let session = other.open(Some(cookie));
    assert!(session.is_new());
    assert!(session.lists().is_empty());
}

#[test]
fn restarted_store_with_same_secret_accepts_cookie_format() {
    let signer = CookieSigner::from_secret(TEST_SECRET);
    let store = session_store();
    let (id, _) = seed_session(&store, groceries());
    assert_eq!(signer.verify(&store.cookie_value(id)), Ok(id));
}

#[test]
fn last_commit_wins() {
    let store = session_store();
    let (id, _) = seed_session(&store, groceries());
    let cookie = store.cookie_value(id);

    let mut tab_a = store.open(Some(&cookie));
    let mut tab_b = store.open(Some(&cookie));
    tab_a.lists_mut().create_list("From A").unwrap();
    tab_b.lists_mut().create_list("From B").unwrap();
    store.commit(tab_a);
    store.commit(tab_b);

    let names: Vec<String> = store
        .open(Some(&cookie))
        .lists()
        .iter()
        .map(|list| list.name.clone())
        .collect();
    assert_eq!(names, vec!["Groceries".to_string(), "From B".to_string()]);
}
