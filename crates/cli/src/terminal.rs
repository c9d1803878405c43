//! Terminal implementation of the interaction seam.

use std::io::{self, BufRead, Write};

use catalog_admin::Interaction;

/// Prints notifications to stdout and asks confirmations on stdin.
pub struct TerminalUi {
    assume_yes: bool,
}

impl TerminalUi {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for TerminalUi {
    fn notify(&self, message: &str) {
        #[allow(clippy::print_stdout)]
        {
            println!("{message}");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(prompt = message, "Confirmed by --yes");
            return true;
        }

        let mut stderr = io::stderr().lock();
        if write!(stderr, "{message} [y/N] ")
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
