use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    controller::TaskListController,
    intent::{HELP, Intent, ListFilter},
    render::{self, Format},
};

/// Result of handling one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(Option<String>),
    Quit,
}

/// Presentation-layer driver: turns input lines into controller calls and
/// renders what the user should see next.
#[derive(Debug, Default)]
pub struct Session {
    controller: TaskListController,
    format: Format,
    /// Skip the automatic list redraw after mutating intents.
    quiet: bool,
}

impl Session {
    pub fn new(format: Format, quiet: bool) -> Self {
        Self {
            controller: TaskListController::new(),
            format,
            quiet,
        }
    }

    pub fn controller(&self) -> &TaskListController {
        &self.controller
    }

    /// Apply one intent to the controller.
    pub fn dispatch(&mut self, intent: &Intent) -> Result<Step> {
        let c = &mut self.controller;
        match intent {
            Intent::SubmitNewTask(text) => {
                c.add(text);
            }
            Intent::ClickDelete(r) => {
                if let Some(id) = r.resolve(c) {
                    c.delete(id);
                }
            }
            Intent::ClickCheckbox(r) => {
                if let Some(id) = r.resolve(c) {
                    c.toggle_complete(id);
                }
            }
            Intent::ClickEdit(r) => {
                if let Some(id) = r.resolve(c) {
                    c.start_edit(id);
                }
            }
            Intent::EditFieldChange(text) => {
                c.update_draft(text);
            }
            Intent::ConfirmEdit => {
                c.save_edit();
            }
            Intent::Cancel => {
                c.cancel_edit();
            }
            Intent::Show(filter) => {
                return Ok(Step::Continue(Some(render::list(c, *filter, self.format)?)));
            }
            Intent::ShowStats => {
                return Ok(Step::Continue(Some(render::stats(c, self.format)?)));
            }
            Intent::Help => return Ok(Step::Continue(Some(HELP.to_owned()))),
            Intent::Quit => return Ok(Step::Quit),
        }

        if self.quiet {
            return Ok(Step::Continue(None));
        }
        let view = render::list(&self.controller, ListFilter::All, self.format)?;
        Ok(Step::Continue(Some(view)))
    }

    /// Parse and apply one line. Malformed lines become a hint, not an error.
    pub fn handle_line(&mut self, line: &str) -> Result<Step> {
        match Intent::parse_line(line) {
            Ok(Some(intent)) => self.dispatch(&intent),
            Ok(None) => Ok(Step::Continue(None)),
            Err(e) => {
                warn!(%e, "unparsed input");
                Ok(Step::Continue(Some(e.to_string())))
            }
        }
    }

    /// Drive the session from `input` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W, prompt: bool) -> Result<()> {
        info!(format = ?self.format, "session started");

        let mut lines = input.lines();
        loop {
            if prompt {
                write!(output, "> ").context("Writing prompt")?;
                output.flush().context("Flushing prompt")?;
            }

            let Some(line) = lines.next() else { break };
            let line = line.context("Reading input line")?;

            match self.handle_line(&line)? {
                Step::Continue(Some(text)) => {
                    writeln!(output, "{text}").context("Writing output")?
                }
                Step::Continue(None) => {}
                Step::Quit => break,
            }
        }

        let stats = self.controller.stats();
        info!(
            total = stats.total,
            completed = stats.completed,
            "session ended"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_redraws_list() {
        let mut session = Session::new(Format::Text, false);
        let step = session.handle_line("add write tests").unwrap();
        match step {
            Step::Continue(Some(out)) => assert!(out.contains("[ ] write tests")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn quiet_suppresses_redraw() {
        let mut session = Session::new(Format::Text, true);
        assert_eq!(
            session.handle_line("add x").unwrap(),
            Step::Continue(None)
        );
        assert_eq!(session.controller().len(), 1);
    }

    #[test]
    fn bad_line_is_a_hint() {
        let mut session = Session::new(Format::Text, true);
        assert_eq!(
            session.handle_line("toggle").unwrap(),
            Step::Continue(Some("`toggle` needs a task number or id".into()))
        );
    }

    #[test]
    fn unknown_position_is_noop() {
        let mut session = Session::new(Format::Text, true);
        session.handle_line("add a").unwrap();
        session.handle_line("toggle 9").unwrap();
        session.handle_line("delete 9").unwrap();
        assert_eq!(session.controller().stats().completed, 0);
        assert_eq!(session.controller().len(), 1);
    }

    #[test]
    fn run_stops_at_quit() {
        let mut session = Session::new(Format::Text, true);
        let input = "add one\nadd two\ntoggle 1\nstats\nquit\nadd never\n";
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out, false).unwrap();

        assert_eq!(session.controller().len(), 2);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "Total tasks: 2 | Completed: 1 | Remaining: 1\n");
    }
}
