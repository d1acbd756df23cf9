//! Display ordering and progress helpers
//!
//! Views show incomplete entries before complete ones. Both partitions keep
//! the relative order of the underlying collection.

use crate::types::{List, Todo};

/// CSS class applied to complete lists and todos
pub const COMPLETE_CLASS: &str = "complete";

/// A list is complete when it has todos and all of them are completed
#[inline]
#[must_use]
pub fn is_list_complete(list: &List) -> bool {
    !list.todos.is_empty() && remaining_count(list) == 0
}

/// CSS class for a list row, if any
#[inline]
#[must_use]
pub fn list_class(list: &List) -> Option<&'static str> {
    is_list_complete(list).then_some(COMPLETE_CLASS)
}

/// CSS class for a todo row, if any
#[inline]
#[must_use]
pub fn todo_class(todo: &Todo) -> Option<&'static str> {
    todo.completed.then_some(COMPLETE_CLASS)
}

/// Number of completed todos in a list
#[must_use]
pub fn completed_count(list: &List) -> usize {
    list.todos.iter().filter(|todo| todo.completed).count()
}

/// Number of todos still to do
#[must_use]
pub fn remaining_count(list: &List) -> usize {
    list.todos.len() - completed_count(list)
}

/// Progress label, e.g. `"1 / 2"` for one of two todos done
#[must_use]
pub fn todos_done_label(list: &List) -> String {
    format!("{} / {}", completed_count(list), list.todos.len())
}

fn stable_partition<'a, T, I, F>(items: I, is_done: F) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> bool,
{
    let (done, mut pending): (Vec<&T>, Vec<&T>) = items.into_iter().partition(|item| is_done(*item));
    pending.extend(done);
    pending
}

/// Lists in display order: incomplete first, complete last
pub fn sort_lists<'a, I>(lists: I) -> Vec<&'a List>
where
    I: IntoIterator<Item = &'a List>,
{
    stable_partition(lists, is_list_complete)
}

/// Todos in display order: incomplete first, complete last
pub fn sort_todos<'a, I>(todos: I) -> Vec<&'a Todo>
where
    I: IntoIterator<Item = &'a Todo>,
{
    stable_partition(todos, |todo| todo.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListId, TodoId};

    fn list_with(flags: &[bool]) -> List {
        let mut list = List::new(ListId(1), "L");
        for (flag, id) in flags.iter().zip(1..) {
            let mut todo = Todo::new(TodoId(id), format!("t{id}"));
            todo.completed = *flag;
            list.todos.push(todo);
        }
        list
    }

    #[test]
    fn empty_list_is_not_complete() {
        let list = list_with(&[]);
        assert!(!is_list_complete(&list));
        assert_eq!(list_class(&list), None);
        assert_eq!(todos_done_label(&list), "0 / 0");
    }

    #[test]
    fn all_done_list_is_complete() {
        let list = list_with(&[true, true]);
        assert!(is_list_complete(&list));
        assert_eq!(list_class(&list), Some("complete"));
    }

    #[test]
    fn label_counts_completed_todos() {
        let list = list_with(&[true, false, false]);
        assert_eq!(todos_done_label(&list), "1 / 3");
        assert_eq!(remaining_count(&list), 2);
    }

    #[test]
    fn sort_todos_moves_completed_last() {
        let list = list_with(&[true, false, true, false]);
        let ids: Vec<u64> = sort_todos(&list.todos).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn sort_lists_moves_complete_last() {
        let mut done = list_with(&[true]);
        done.id = ListId(1);
        let mut empty = list_with(&[]);
        empty.id = ListId(2);
        let mut open = list_with(&[false, true]);
        open.id = ListId(3);

        let lists = vec![done, empty, open];
        let ids: Vec<u64> = sort_lists(&lists).iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
