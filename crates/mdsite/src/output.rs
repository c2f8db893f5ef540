//! Status lines printed to stderr, keeping stdout free for `mdsite render`.

use console::{Style, Term};

/// Writes user-facing status lines, colored when stderr is a terminal.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            failed: Style::new().red(),
        }
    }

    /// Progress detail, uncolored.
    pub(crate) fn info(&self, msg: &str) {
        self.write(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.write(&self.ok.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.write(&self.failed.apply_to(msg).to_string());
    }

    // A closed stderr leaves nowhere to report the failure.
    fn write(&self, line: &str) {
        let _ = self.term.write_line(line);
    }
}
