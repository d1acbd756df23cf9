//! Lookup and mutation operations over a session's lists
//!
//! Every operation is a single in-memory edit of [`Lists`]: either it
//! succeeds completely or it leaves the collection untouched.

use crate::error::{TodoError, TodoResult};
use crate::types::{List, ListId, Lists, Todo, TodoId};
use crate::validation::{normalize_name, validate_list_name, validate_list_rename, validate_todo_name};

impl Lists {
    /// Find a list by id
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    pub fn find_list(&self, id: ListId) -> TodoResult<&List> {
        self.items
            .iter()
            .find(|list| list.id == id)
            .ok_or(TodoError::ListNotFound(id))
    }

    /// Find a list by id for mutation
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    pub fn find_list_mut(&mut self, id: ListId) -> TodoResult<&mut List> {
        self.items
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or(TodoError::ListNotFound(id))
    }

    /// Create a list with the given name and no todos
    ///
    /// The name is stripped of surrounding whitespace before validation.
    ///
    /// # Errors
    /// - `TodoError::InvalidLength` / `TodoError::DuplicateName` from validation
    pub fn create_list(&mut self, name: &str) -> TodoResult<&List> {
        let name = normalize_name(name);
        validate_list_name(name, &self.items)?;

        let id = self.next_list_id();
        tracing::debug!(%id, list_name = name, "creating list");
        self.items.push(List::new(id, name));

        // Just pushed, so the last element is the new list
        let idx = self.items.len() - 1;
        Ok(&self.items[idx])
    }

    /// Rename a list
    ///
    /// Uniqueness is checked against every other list; keeping the current
    /// name is allowed.
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    /// - `TodoError::InvalidLength` / `TodoError::DuplicateName` from validation
    pub fn rename_list(&mut self, id: ListId, new_name: &str) -> TodoResult<()> {
        let new_name = normalize_name(new_name);
        self.find_list(id)?;
        validate_list_rename(new_name, &self.items, Some(id))?;

        let list = self.find_list_mut(id)?;
        tracing::debug!(%id, from = %list.name, to = new_name, "renaming list");
        list.name = new_name.to_string();
        Ok(())
    }

    /// Remove a list, returning it if it existed
    pub fn delete_list(&mut self, id: ListId) -> Option<List> {
        let idx = self.items.iter().position(|list| list.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Append a todo to a list
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    /// - `TodoError::InvalidLength` if the name is empty or too long
    pub fn create_todo(&mut self, list_id: ListId, name: &str) -> TodoResult<&Todo> {
        let name = normalize_name(name);
        let list = self.find_list_mut(list_id)?;
        validate_todo_name(name)?;

        let id = list.next_todo_id();
        tracing::debug!(list = %list_id, todo = %id, todo_name = name, "adding todo");
        list.todos.push(Todo::new(id, name));

        let idx = list.todos.len() - 1;
        Ok(&list.todos[idx])
    }

    /// Remove a todo from a list, returning it if it existed
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> TodoResult<Option<Todo>> {
        let list = self.find_list_mut(list_id)?;
        let position = list.todos.iter().position(|todo| todo.id == todo_id);
        Ok(position.map(|idx| list.todos.remove(idx)))
    }

    /// Set the completion flag of one todo
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    /// - `TodoError::TodoNotFound` if the list has no todo with this id
    pub fn set_todo_completed(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> TodoResult<()> {
        let todo = self
            .find_list_mut(list_id)?
            .todo_mut(todo_id)
            .ok_or(TodoError::TodoNotFound {
                list: list_id,
                todo: todo_id,
            })?;
        todo.completed = completed;
        Ok(())
    }

    /// Mark every todo in a list complete
    ///
    /// # Returns
    /// Number of todos that were incomplete before the call
    ///
    /// # Errors
    /// - `TodoError::ListNotFound` if no list has this id
    pub fn complete_all(&mut self, list_id: ListId) -> TodoResult<usize> {
        let list = self.find_list_mut(list_id)?;
        let mut changed = 0;
        for todo in list.todos.iter_mut().filter(|todo| !todo.completed) {
            todo.completed = true;
            changed += 1;
        }
        Ok(changed)
    }
}
