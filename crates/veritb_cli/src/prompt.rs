//! Yes/no questions asked while generating.

use std::io::{self, BufRead, Write};

use log::debug;
use veritb_config::Choice;

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Returns `true` if the answer is yes.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on stdout and reads one line from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question} [Y/N] ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

/// `Y` and `y` mean yes; anything else, including no input, means no.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim_end_matches(['\r', '\n']), "Y" | "y")
}

/// Answers a question from the configured [`Choice`], prompting only for
/// [`Choice::Ask`].
pub fn decide(choice: Choice, question: &str, confirm: &mut dyn Confirm) -> io::Result<bool> {
    let answer = match choice {
        Choice::Yes => true,
        Choice::No => false,
        Choice::Ask => confirm.confirm(question)?,
    };
    debug!("{question} -> {}", if answer { "yes" } else { "no" });
    Ok(answer)
}
