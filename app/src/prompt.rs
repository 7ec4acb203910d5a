use std::io::{
    self,
    BufRead,
    IsTerminal,
    Write,
};

use anyhow::{
    bail,
    Context,
    Result,
};
use dialoguer::Input;


/// Asks for one line of input, interactively on a terminal, or from piped stdin
pub(crate) fn ask(prompt: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        Input::<String>::new().with_prompt(prompt).interact_text().map_err(Into::into)
    } else {
        eprint!("{prompt}: ");
        io::stderr().flush()?;
        read_answer(&mut io::stdin().lock())
    }
}

/// Reads a single trimmed line
///
/// # Errors
///
/// Fails on read errors and when the input ends before a line is given.
pub(crate) fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line).context("Failed to read input")? == 0 {
        bail!("Input ended before an answer was given");
    }
    Ok(line.trim().to_owned())
}
