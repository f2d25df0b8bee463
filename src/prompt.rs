//! Interactive input seam
//!
//! The escrow controller only talks to [`Prompt`]. The binary plugs in
//! [`TerminalPrompt`]; tests and scripted runs use [`ScriptedPrompt`].

use std::collections::VecDeque;
use std::io;

use zeroize::Zeroizing;

/// Source of operator answers
pub trait Prompt {
    /// Ask for free text
    ///
    /// # Errors
    /// Returns an error if the input source is closed or unreadable
    fn input(&mut self, question: &str) -> io::Result<String>;

    /// Ask for a secret without echoing it
    ///
    /// # Errors
    /// Returns an error if the input source is closed or unreadable
    fn password(&mut self, question: &str) -> io::Result<Zeroizing<String>>;

    /// Ask a yes/no question
    ///
    /// # Errors
    /// Returns an error if the input source is closed or unreadable
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.input(&format!("{question} [y/n] "))?;
        Ok(is_affirmative(&answer))
    }
}

/// Anything starting with `y` or `Y` is a yes, everything else a no
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// Prompts on stderr, reads from stdin
///
/// Masked entry goes through the terminal when stdin is a TTY. When stdin is
/// piped every answer, secret or not, is one line of input.
#[cfg(feature = "cli")]
#[derive(Debug)]
pub struct TerminalPrompt {
    interactive: bool,
}

#[cfg(feature = "cli")]
impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    fn read_line() -> io::Result<String> {
        use std::io::BufRead;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(feature = "cli")]
impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
impl Prompt for TerminalPrompt {
    fn input(&mut self, question: &str) -> io::Result<String> {
        use std::io::Write;

        eprint!("{question}");
        io::stderr().flush()?;
        Self::read_line()
    }

    fn password(&mut self, question: &str) -> io::Result<Zeroizing<String>> {
        if self.interactive {
            rpassword::prompt_password(question).map(Zeroizing::new)
        } else {
            eprintln!("{question}");
            Self::read_line().map(Zeroizing::new)
        }
    }
}

/// Replays canned answers in order and records every question asked
///
/// Free text, masked and yes/no answers are all drawn from the same queue.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> io::Result<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer left for '{question}'"),
            )
        })
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, question: &str) -> io::Result<String> {
        self.next(question)
    }

    fn password(&mut self, question: &str) -> io::Result<Zeroizing<String>> {
        self.next(question).map(Zeroizing::new)
    }
}
