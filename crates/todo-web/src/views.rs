//! HTML pages
//!
//! Templates live in `templates/` and are compiled into the binary. Page
//! data is flattened into view models first, so templates only loop and
//! print; ordering and progress rules stay in `todo_core::ordering`.

use crate::error::WebError;
use minijinja::{context, Environment, Value};
use serde::Serialize;
use todo_core::ordering::{list_class, sort_lists, sort_todos, todo_class, todos_done_label};
use todo_core::{List, Lists, Todo};
use todo_session::Flash;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("lists.html", include_str!("../templates/lists.html")),
    ("new_list.html", include_str!("../templates/new_list.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("edit_list.html", include_str!("../templates/edit_list.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Todo row
#[derive(Debug, Clone, Serialize)]
pub struct TodoView<'a> {
    /// Todo id
    pub id: u64,
    /// Todo name
    pub name: &'a str,
    /// Completion flag
    pub completed: bool,
    /// Row CSS class
    pub class: Option<&'static str>,
}

impl<'a> TodoView<'a> {
    fn new(todo: &'a Todo) -> Self {
        Self {
            id: todo.id.0,
            name: &todo.name,
            completed: todo.completed,
            class: todo_class(todo),
        }
    }
}

/// List summary or detail
#[derive(Debug, Clone, Serialize)]
pub struct ListView<'a> {
    /// List id
    pub id: u64,
    /// List name
    pub name: &'a str,
    /// Row CSS class
    pub class: Option<&'static str>,
    /// `"done / total"` progress label; printed with `|safe` because HTML
    /// escaping encodes the slash
    pub done_label: String,
    /// Todos in display order
    pub todos: Vec<TodoView<'a>>,
}

impl<'a> ListView<'a> {
    /// Flatten a list for display
    #[must_use]
    pub fn new(list: &'a List) -> Self {
        Self {
            id: list.id.0,
            name: &list.name,
            class: list_class(list),
            done_label: todos_done_label(list),
            todos: sort_todos(&list.todos).into_iter().map(TodoView::new).collect(),
        }
    }
}

/// Template environment with every page registered
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile the bundled templates
    ///
    /// # Errors
    /// - `WebError::Render` if a template does not parse
    pub fn new() -> Result<Self, WebError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render(&self, name: &str, flash: &Flash, page: Value) -> Result<String, WebError> {
        let html = self
            .env
            .get_template(name)?
            .render(context! { flash => flash, page => page })?;
        Ok(html)
    }

    /// Index of all lists, incomplete first
    ///
    /// # Errors
    /// - `WebError::Render` if the template fails
    pub fn lists_page(&self, flash: &Flash, lists: &Lists) -> Result<String, WebError> {
        let lists: Vec<ListView<'_>> = sort_lists(lists).into_iter().map(ListView::new).collect();
        self.render("lists.html", flash, context! { lists => lists })
    }

    /// New list form, optionally repopulated with a rejected name
    ///
    /// # Errors
    /// - `WebError::Render` if the template fails
    pub fn new_list_page(&self, flash: &Flash, submitted: &str) -> Result<String, WebError> {
        self.render("new_list.html", flash, context! { list_name => submitted })
    }

    /// One list with its todos and the add-todo form
    ///
    /// # Errors
    /// - `WebError::Render` if the template fails
    pub fn list_page(&self, flash: &Flash, list: &List, submitted_todo: &str) -> Result<String, WebError> {
        self.render(
            "list.html",
            flash,
            context! { list => ListView::new(list), todo => submitted_todo },
        )
    }

    /// Rename form; shows the rejected name when re-rendered after an error
    ///
    /// # Errors
    /// - `WebError::Render` if the template fails
    pub fn edit_list_page(
        &self,
        flash: &Flash,
        list: &List,
        submitted: Option<&str>,
    ) -> Result<String, WebError> {
        let list_name = submitted.unwrap_or(&list.name);
        self.render(
            "edit_list.html",
            flash,
            context! { list => ListView::new(list), list_name => list_name },
        )
    }

    /// Bare error page for unrecovered failures
    ///
    /// # Errors
    /// - `WebError::Render` if the template fails
    pub fn error_page(&self, status: u16, message: &str) -> Result<String, WebError> {
        self.render(
            "error.html",
            &Flash::default(),
            context! { status => status, message => message },
        )
    }
}
