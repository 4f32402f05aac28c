use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDateTime;
use derive_more::Display;

use crate::basic::error::TodosError;
use crate::basic::field::{TodosField, DATETIME_INPUT_FORMAT, PRIO_NONE};
use crate::basic::result::TodosResult;
use crate::dto::sub_todo_dto::SubTodoDetailResp;
use crate::dto::todo_dto::TodoDetailResp;

static DEADLINE_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Normalize a stored priority to its display level, 4 means none
pub fn map_priority(prio: Option<i32>) -> u8 {
    match prio {
        Some(1) => 1,
        Some(2) => 2,
        Some(3) => 3,
        _ => PRIO_NONE as u8,
    }
}

/// `DD.MM.YYYY HH:MM`, empty for a missing or unreadable deadline
pub fn format_deadline_display(deadline: Option<&str>) -> String {
    deadline.and_then(|deadline| TodosField.parse_datetime(deadline).ok()).map(|deadline| deadline.format(DEADLINE_DISPLAY_FORMAT).to_string()).unwrap_or_default()
}

/// Convert a stored or typed date-time to the `YYYY-MM-DDTHH:MM` editor format
pub fn parse_datetime(value: &str) -> TodosResult<String> {
    if value.trim().is_empty() {
        return Err(TodosError::ValidationError("[Todos.Client] Empty datetime".to_string()));
    }
    Ok(TodosField.parse_datetime(value)?.format(DATETIME_INPUT_FORMAT).to_string())
}

/// Read access shared by todos and sub todos
pub trait TodoItem {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
    fn prio(&self) -> Option<i32>;
    fn deadline(&self) -> Option<&str>;
}

impl TodoItem for TodoDetailResp {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn prio(&self) -> Option<i32> {
        self.prio
    }

    fn deadline(&self) -> Option<&str> {
        self.deadline.as_deref()
    }
}

impl TodoItem for SubTodoDetailResp {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn prio(&self) -> Option<i32> {
        self.prio
    }

    fn deadline(&self) -> Option<&str> {
        self.deadline.as_deref()
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    #[display("prio")]
    Prio,
    #[display("deadline")]
    Deadline,
    #[default]
    #[display("name")]
    Name,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

/// Sort selection of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub sort_type: SortType,
    pub sort_order: SortOrder,
}

impl SortState {
    /// Pressing the active sort again flips the order, another sort starts ascending
    pub fn toggle(&mut self, sort_type: SortType) {
        if self.sort_type == sort_type {
            self.sort_order = match self.sort_order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.sort_type = sort_type;
            self.sort_order = SortOrder::Asc;
        }
    }
}

/// Stable sort, items that compare equal stay in id order.
///
/// Missing deadlines go last when ascending and first when descending.
pub fn sort_todos<T: TodoItem>(items: &mut [T], sort: &SortState) {
    items.sort_by_key(|item| item.id());
    items.sort_by(|a, b| {
        let ordering = match sort.sort_type {
            SortType::Prio => map_priority(a.prio()).cmp(&map_priority(b.prio())),
            SortType::Deadline => compare_deadline(a.deadline(), b.deadline()),
            SortType::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        };
        match sort.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_deadline(a: Option<&str>, b: Option<&str>) -> Ordering {
    let parse = |deadline: Option<&str>| -> Option<NaiveDateTime> { deadline.and_then(|deadline| TodosField.parse_datetime(deadline).ok()) };
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// View model of a rendered list
#[derive(Debug, Clone)]
pub struct TodoListView<T: TodoItem> {
    items: Vec<T>,
    sort: SortState,
    open_editor: Option<i32>,
    completing: HashSet<i32>,
    /// Message shown to the user after a failed action
    pub error: Option<String>,
}

impl<T: TodoItem> TodoListView<T> {
    pub fn new(items: Vec<T>) -> TodoListView<T> {
        let mut view = TodoListView {
            items,
            sort: SortState::default(),
            open_editor: None,
            completing: HashSet::new(),
            error: None,
        };
        sort_todos(&mut view.items, &view.sort);
        view
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Replace the items, e.g. after reloading from the server, keeping the sort
    pub fn reload(&mut self, items: Vec<T>) {
        self.items = items;
        self.completing.retain(|id| self.items.iter().any(|item| item.id() == *id));
        if self.open_editor.is_some_and(|id| !self.items.iter().any(|item| item.id() == id)) {
            self.open_editor = None;
        }
        sort_todos(&mut self.items, &self.sort);
    }

    pub fn toggle_sort(&mut self, sort_type: SortType) {
        self.sort.toggle(sort_type);
        sort_todos(&mut self.items, &self.sort);
    }

    /// Open the editor of `id`, closing any other one
    pub fn open_editor(&mut self, id: i32) -> TodosResult<()> {
        if !self.items.iter().any(|item| item.id() == id) {
            return Err(TodosError::NotFound(format!("[Todos.Client] Item {id} not found")));
        }
        self.open_editor = Some(id);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.open_editor = None;
    }

    pub fn open_editor_id(&self) -> Option<i32> {
        self.open_editor
    }

    /// Mark `id` as completing before the server has answered
    pub fn begin_complete(&mut self, id: i32) -> TodosResult<()> {
        if !self.items.iter().any(|item| item.id() == id) {
            return Err(TodosError::NotFound(format!("[Todos.Client] Item {id} not found")));
        }
        self.completing.insert(id);
        self.error = None;
        Ok(())
    }

    pub fn is_completing(&self, id: i32) -> bool {
        self.completing.contains(&id)
    }

    /// Apply the server answer of a completion, removing the item or reverting the mark
    pub fn finish_complete(&mut self, id: i32, result: TodosResult<()>) {
        self.completing.remove(&id);
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                if self.open_editor == Some(id) {
                    self.open_editor = None;
                }
            }
            Err(error) => {
                self.error = Some(format!("Could not complete item {id}: {}", error.message()));
            }
        }
    }
}
