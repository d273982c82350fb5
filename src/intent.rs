use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

use crate::{controller::TaskListController, model::TaskId};

/// How a line refers to a task: 1-based position in the list, or its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRef {
    Position(usize),
    Id(TaskId),
}

impl TaskRef {
    /// Look the reference up against the current list.
    pub fn resolve(&self, controller: &TaskListController) -> Option<TaskId> {
        match *self {
            TaskRef::Position(n) => n
                .checked_sub(1)
                .and_then(|i| controller.tasks().get(i))
                .map(|t| t.id()),
            TaskRef::Id(id) => controller.get(id).map(|t| t.id()),
        }
    }
}

impl FromStr for TaskRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if let Ok(n) = digits.parse::<usize>() {
            return Ok(TaskRef::Position(n));
        }
        Uuid::parse_str(s)
            .map(|u| TaskRef::Id(u.into()))
            .map_err(|_| ParseError::BadRef(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl ListFilter {
    pub fn admits(&self, completed: bool) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Active => !completed,
            ListFilter::Completed => completed,
        }
    }
}

impl FromStr for ListFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ListFilter::All),
            "active" | "open" | "remaining" => Ok(ListFilter::Active),
            "completed" | "done" => Ok(ListFilter::Completed),
            other => Err(ParseError::BadFilter(other.to_owned())),
        }
    }
}

/// One user intent forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitNewTask(String),
    ClickDelete(TaskRef),
    ClickCheckbox(TaskRef),
    ClickEdit(TaskRef),
    EditFieldChange(String),
    ConfirmEdit,
    Cancel,
    Show(ListFilter),
    ShowStats,
    Help,
    Quit,
}

impl Intent {
    /// Parse one input line. `Ok(None)` for a blank line.
    pub fn parse_line(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let head = line.trim_start();
        if head.trim().is_empty() {
            return Ok(None);
        }

        // Keep the argument untouched apart from the single separator (any
        // whitespace char) so drafts can carry leading/trailing whitespace.
        let (verb, arg) = match head.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg),
            None => (head, ""),
        };

        let intent = match verb.to_ascii_lowercase().as_str() {
            "add" | "a" => Intent::SubmitNewTask(arg.to_owned()),
            "delete" | "del" | "rm" => Intent::ClickDelete(required_ref(verb, arg)?),
            "toggle" | "done" | "check" => Intent::ClickCheckbox(required_ref(verb, arg)?),
            "edit" | "e" => Intent::ClickEdit(required_ref(verb, arg)?),
            "draft" | "type" => Intent::EditFieldChange(arg.to_owned()),
            "save" => Intent::ConfirmEdit,
            "cancel" | "esc" => Intent::Cancel,
            "list" | "ls" => Intent::Show(arg.trim().parse()?),
            "stats" => Intent::ShowStats,
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            _ => return Err(ParseError::UnknownCommand(verb.to_owned())),
        };
        Ok(Some(intent))
    }
}

fn required_ref(verb: &str, arg: &str) -> Result<TaskRef, ParseError> {
    if arg.trim().is_empty() {
        return Err(ParseError::MissingRef(verb.to_owned()));
    }
    arg.parse()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs a task number or id")]
    MissingRef(String),
    #[error("`{0}` is not a task number or id")]
    BadRef(String),
    #[error("unknown list filter `{0}` (all, active, completed)")]
    BadFilter(String),
}

pub const HELP: &str = "\
commands:
  add <text>              add a task
  toggle <n|id>           mark done / not done
  edit <n|id>             start editing a task
  draft <text>            replace the edit draft
  save                    commit the draft
  cancel                  discard the draft
  delete <n|id>           remove a task
  list [all|active|completed]
  stats                   total / completed / remaining
  quit";
