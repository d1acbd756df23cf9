//! End-to-end scenarios over the list operations

use pretty_assertions::assert_eq;
use todo_core::ordering::{sort_todos, todos_done_label};
use todo_core::{Lists, TodoError};
use todo_test_utils::{groceries, list_id, todo_id};

#[test]
fn groceries_progress_and_order() {
    let mut lists = Lists::new();
    let id = lists.create_list("Groceries").unwrap().id;
    let milk = lists.create_todo(id, "Milk").unwrap().id;
    lists.create_todo(id, "Eggs").unwrap();
    lists.set_todo_completed(id, milk, true).unwrap();

    let list = lists.find_list(id).unwrap();
    assert_eq!(todos_done_label(list), "1 / 2");

    let names: Vec<&str> = sort_todos(&list.todos).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Eggs", "Milk"]);
}

#[test]
fn duplicate_list_name_leaves_first_untouched() {
    let mut lists = Lists::new();
    let first = lists.create_list("A").unwrap().clone();

    assert_eq!(lists.create_list("A").unwrap_err(), TodoError::DuplicateName);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists.find_list(first.id).unwrap(), &first);
}

#[test]
fn deleted_list_is_not_found() {
    let mut lists = groceries();
    let id = list_id(&lists, "Groceries");

    assert!(lists.delete_list(id).is_some());
    assert_eq!(lists.find_list(id), Err(TodoError::ListNotFound(id)));
}

#[test]
fn fixture_ids_resolve_by_name() {
    let lists = groceries();
    let id = list_id(&lists, "Groceries");
    let eggs = todo_id(&lists, id, "Eggs");
    assert!(!lists.find_list(id).unwrap().todo(eggs).unwrap().completed);
}
