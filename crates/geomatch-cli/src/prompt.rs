//! Interactive path selection.
//!
//! Every flag the two subcommands take can be omitted, in which case the
//! value is asked for on stdin. The original field workflow is a bare
//! double-click on the executable, so the prompts carry the whole
//! configuration when no flags are given. The [`Prompt`] trait is the seam
//! that keeps these flows testable without a terminal.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};

use geomatch_ingest::list_csv_files;

/// Line-oriented prompt source.
pub trait Prompt {
    /// Shows `message` and reads one line, trimmed.
    ///
    /// # Errors
    ///
    /// I/O errors from the underlying terminal or script.
    fn line(&mut self, message: &str) -> io::Result<String>;
}

/// Stdin-backed prompt used by the binary.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn line(&mut self, message: &str) -> io::Result<String> {
        print!("{message}");
        io::stdout().flush()?;
        let mut buffer = String::new();
        io::stdin().lock().read_line(&mut buffer)?;
        Ok(buffer.trim().to_string())
    }
}

/// Scripted prompt answering from a fixed list, for tests.
pub struct ScriptedPrompt {
    answers: Vec<String>,
    next: usize,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| (*s).to_string()).collect(),
            next: 0,
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn line(&mut self, _message: &str) -> io::Result<String> {
        let answer = self
            .answers
            .get(self.next)
            .cloned()
            .ok_or_else(|| io::Error::other("scripted prompt ran out of answers"))?;
        self.next += 1;
        Ok(answer)
    }
}

/// Asks for a single path. Empty input is a configuration error, not a
/// retry; the flows stay strictly linear like the original console tool.
pub fn prompt_path(prompt: &mut dyn Prompt, message: &str) -> Result<PathBuf> {
    let line = prompt.line(message)?;
    if line.is_empty() {
        bail!("no path given");
    }
    Ok(PathBuf::from(line))
}

/// Lists the CSV files in `dir` as a numbered menu and asks for a 1-based
/// selection.
pub fn select_csv_from(prompt: &mut dyn Prompt, dir: &Path, what: &str) -> Result<PathBuf> {
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        bail!("no CSV files found in {}", dir.display());
    }

    println!("Available {what} CSV files:");
    for (index, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        println!("{}. {name}", index + 1);
    }

    let choice = prompt.line(&format!("Select the {what} CSV file by number: "))?;
    pick_from_list(&files, &choice).map(Path::to_path_buf)
}

/// Asks for a directory first, then runs the menu over its CSV files.
pub fn select_csv_interactive(prompt: &mut dyn Prompt, what: &str) -> Result<PathBuf> {
    let dir = prompt_path(prompt, &format!("Enter the folder containing the {what} CSV: "))?;
    select_csv_from(prompt, &dir, what)
}

/// Resolves a 1-based menu selection against the listed files.
pub fn pick_from_list<'a>(files: &'a [PathBuf], input: &str) -> Result<&'a Path> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid selection: '{input}'"))?;
    if number == 0 || number > files.len() {
        bail!("invalid selection: {number} (choose 1-{})", files.len());
    }
    Ok(&files[number - 1])
}
