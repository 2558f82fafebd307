//! Line-based operator prompt over any reader/writer pair (stdin/stdout in
//! the binary).

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

use crate::ports::{Prompt, PromptError};

pub struct LinePrompt<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

/// Prompt on the process terminal
pub type StdinPrompt = LinePrompt<BufReader<Stdin>, Stdout>;

impl StdinPrompt {
    pub fn stdio() -> Self {
        LinePrompt::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Consume the prompt and return the writer
    pub fn into_output(self) -> W {
        match self.output.into_inner() {
            Ok(output) => output,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R, W> Prompt for LinePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn ask(&self, question: &str) -> Result<String, PromptError> {
        {
            let mut output = self.output.lock().map_err(|_| PromptError::Closed)?;
            output.write_all(question.as_bytes())?;
            output.flush()?;
        }

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .map_err(|_| PromptError::Closed)?
            .read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn say(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            if let Err(e) = writeln!(output, "{}", line) {
                tracing::warn!("Failed to write to terminal: {}", e);
            }
        }
    }

    fn progress(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            if let Err(e) = write!(output, "\r{}", line).and_then(|_| output.flush()) {
                tracing::warn!("Failed to write to terminal: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_ask_trims_answer() {
        let prompt = LinePrompt::new(Cursor::new("  alpha \n2\n"), Vec::new());

        let first = assert_ok!(prompt.ask("Name: "));
        let second = assert_ok!(prompt.ask("Option: "));

        assert_eq!(first, "alpha");
        assert_eq!(second, "2");
        assert_eq!(String::from_utf8(prompt.into_output()).unwrap(), "Name: Option: ");
    }

    #[test]
    fn test_blank_line_is_empty_answer() {
        let prompt = LinePrompt::new(Cursor::new("\n"), Vec::new());
        assert_eq!(assert_ok!(prompt.ask("? ")), "");
    }

    #[test]
    fn test_end_of_input_is_closed() {
        let prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        let err = assert_err!(prompt.ask("? "));
        assert!(matches!(err, PromptError::Closed));
    }

    #[test]
    fn test_progress_rewrites_line() {
        let prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        prompt.progress("Time remaining: 2s ");
        prompt.progress("Time remaining: 1s ");
        prompt.say("");
        assert_eq!(
            String::from_utf8(prompt.into_output()).unwrap(),
            "\rTime remaining: 2s \rTime remaining: 1s \n"
        );
    }

    #[test]
    fn test_say_writes_line() {
        let prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        prompt.say("Balance: 1 SOL");
        prompt.say("done");
        assert_eq!(
            String::from_utf8(prompt.into_output()).unwrap(),
            "Balance: 1 SOL\ndone\n"
        );
    }
}
