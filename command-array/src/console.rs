use std::{fmt::Display, io::{BufRead, Write}, str::FromStr};

use anyhow::{bail, Context};

/// Line based terminal I/O. Generic so the menus can be driven by a script in tests.
pub struct Console<R, W> {
    input: R,
    pub out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Console { input, out }
    }

    pub fn header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "\t\t{title}")?;
        writeln!(self.out)?;

        Ok(())
    }

    pub fn line(&mut self, text: impl Display) -> anyhow::Result<()> {
        writeln!(self.out, "{text}")?;

        Ok(())
    }

    /// Reads one line without the trailing newline. End of input is an error.
    pub fn read_line(&mut self) -> anyhow::Result<String> {
        self.out.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read from console")?;
        if read == 0 {
            bail!("Console input closed");
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn prompt(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.out, "{prompt}")?;
        self.read_line()
    }

    /// Asks until the answer parses as a `T`.
    pub fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> anyhow::Result<T> {
        loop {
            let answer = self.prompt(prompt)?;
            match answer.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    log::debug!("Rejected numeric input {answer:?}");
                    self.line(format!("\"{}\" is not a valid number, try again.", answer.trim()))?;
                }
            }
        }
    }

    pub fn continue_prompt(&mut self) -> anyhow::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Press Enter to continue.")?;
        self.read_line()?;

        Ok(())
    }
}
