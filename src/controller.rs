use tracing::debug;

use crate::model::{EditState, Stats, Task, TaskId, TaskText};

/// Owns the task list and the single in-progress edit.
///
/// Every operation is total: invalid input (blank text, unknown id, no
/// active edit) is a no-op rather than an error. Mutators report whether
/// anything changed so a presentation layer can skip redundant redraws.
#[derive(Debug, Default)]
pub struct TaskListController {
    tasks: Vec<Task>,
    edit: EditState,
}

impl TaskListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new task. Blank input is ignored.
    pub fn add(&mut self, raw: &str) -> Option<TaskId> {
        let Some(text) = TaskText::parse(raw) else {
            debug!("add ignored: blank text");
            return None;
        };

        let task = Task::new(text);
        let id = task.id();
        debug!(%id, text = %task.text(), "task added");
        self.tasks.push(task);
        Some(id)
    }

    /// Remove a task. Deleting the task under edit also ends the edit.
    pub fn delete(&mut self, id: TaskId) -> bool {
        // `retain` keeps all elements for which the predicate is *true*.
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        if before == self.tasks.len() {
            debug!(%id, "delete ignored: unknown id");
            return false;
        }

        if self.edit.editing_id() == Some(id) {
            debug!(%id, "edit cleared: target deleted");
            self.edit = EditState::Idle;
        }
        debug!(%id, "task deleted");
        true
    }

    /// Flip the completion flag.
    ///
    /// The task currently under edit is deliberately left alone: while a task
    /// is in edit mode only `delete` may act on it. This differs from a plain
    /// checkbox that stays clickable during an edit.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        if self.is_editing(id) {
            debug!(%id, "toggle ignored: task is being edited");
            return false;
        }

        match self.tasks.iter_mut().find(|t| t.id() == id) {
            Some(task) => {
                task.toggle();
                debug!(%id, completed = task.is_completed(), "task toggled");
                true
            }
            None => {
                debug!(%id, "toggle ignored: unknown id");
                false
            }
        }
    }

    /// Enter edit mode for `id`, seeding the draft with its current text.
    ///
    /// Switching from another task discards that task's unsaved draft;
    /// nothing is committed implicitly.
    pub fn start_edit(&mut self, id: TaskId) -> bool {
        if self.is_editing(id) {
            debug!(%id, "start edit ignored: already editing");
            return false;
        }

        let Some(task) = self.get(id) else {
            debug!(%id, "start edit ignored: unknown id");
            return false;
        };

        let draft = task.text().as_str().to_owned();
        if let Some(previous) = self.edit.editing_id() {
            debug!(%previous, "unsaved draft discarded");
        }
        self.edit = EditState::Editing { id, draft };
        debug!(%id, "edit started");
        true
    }

    /// Replace the draft verbatim. Only valid while editing.
    pub fn update_draft(&mut self, text: &str) -> bool {
        match &mut self.edit {
            EditState::Editing { draft, .. } => {
                draft.clear();
                draft.push_str(text);
                true
            }
            EditState::Idle => {
                debug!("draft update ignored: not editing");
                false
            }
        }
    }

    /// Commit the trimmed draft and leave edit mode.
    ///
    /// A blank draft is ignored and the edit stays open. If the target task
    /// is gone the edit is dropped without committing.
    pub fn save_edit(&mut self) -> bool {
        let EditState::Editing { id, draft } = &self.edit else {
            debug!("save ignored: not editing");
            return false;
        };
        let id = *id;

        let Some(text) = TaskText::parse(draft) else {
            debug!(%id, "save ignored: blank draft");
            return false;
        };

        match self.tasks.iter_mut().find(|t| t.id() == id) {
            Some(task) => {
                let changed = task.set_text(text);
                debug!(%id, changed, "edit saved");
            }
            None => debug!(%id, "edit dropped: target no longer exists"),
        }
        self.edit = EditState::Idle;
        true
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel_edit(&mut self) -> bool {
        match std::mem::take(&mut self.edit) {
            EditState::Editing { id, .. } => {
                debug!(%id, "edit cancelled");
                true
            }
            EditState::Idle => false,
        }
    }

    /// Counts recomputed from the current list on every call.
    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.edit.editing_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&str> {
        self.edit.draft()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
