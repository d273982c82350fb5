use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

// Self documenting alias
pub type TimeStamp = OffsetDateTime;

// --- Task Identity ---
/// Opaque, random task identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TaskId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// --- Task Text ---
/// Trimmed, non-empty task text. The only way in is [`TaskText::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskText(String);

impl TaskText {
    /// Trims `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TaskText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Task Object ---
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /** Immutable primary key (unique per task) */
    id: TaskId,

    /** Committed text, always trimmed and non-empty */
    text: TaskText,

    /** Completion flag, flipped by toggling */
    completed: bool,

    /** Created at UTC time (immutable once set) */
    created_at: TimeStamp,

    /** Last time text or completion changed */
    updated_at: Option<TimeStamp>,

    /** When task was last marked completed */
    completed_at: Option<TimeStamp>,
}

impl Task {
    /// Fresh, not-completed task with a new random id.
    pub fn new(text: TaskText) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: TimeStamp::now_utc(),
            updated_at: None,
            completed_at: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &TaskText {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> TimeStamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<TimeStamp> {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<TimeStamp> {
        self.completed_at
    }

    /// Flip completion & stamp times.
    pub(crate) fn toggle(&mut self) {
        let now = TimeStamp::now_utc();
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
        self.updated_at = Some(now);
    }

    /// Replace committed text. Returns false when the text was already equal.
    pub(crate) fn set_text(&mut self, text: TaskText) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text;
        self.updated_at = Some(TimeStamp::now_utc());
        true
    }
}

// --- Edit Mode ---
/// At most one task is edited at a time. The draft is scratch text and is
/// only trimmed when saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        id: TaskId,
        draft: String,
    },
}

impl EditState {
    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(*id),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditState::Idle => None,
            EditState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditState::Idle)
    }
}

// --- Derived Counts ---
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        let text = TaskText::parse("  buy milk \t").unwrap();
        assert_eq!(text, "buy milk");
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(TaskText::parse(""), None);
        assert_eq!(TaskText::parse("   \n\t"), None);
    }

    #[test]
    fn toggle_stamps_and_clears_completed_at() {
        let mut task = Task::new(TaskText::parse("x").unwrap());
        assert!(!task.is_completed());
        assert!(task.updated_at().is_none());

        task.toggle();
        assert!(task.is_completed());
        assert!(task.completed_at().is_some());
        assert!(task.updated_at().is_some());

        task.toggle();
        assert!(!task.is_completed());
        assert!(task.completed_at().is_none());
    }

    #[test]
    fn set_same_text_is_not_a_change() {
        let mut task = Task::new(TaskText::parse("same").unwrap());
        assert!(!task.set_text(TaskText::parse(" same ").unwrap()));
        assert!(task.updated_at().is_none());
        assert!(task.set_text(TaskText::parse("other").unwrap()));
        assert_eq!(task.text(), &"other");
    }

    #[test]
    fn ids_are_unique() {
        let a = Task::new(TaskText::parse("a").unwrap());
        let b = Task::new(TaskText::parse("a").unwrap());
        assert_ne!(a.id(), b.id());
    }
}
