//! Line-oriented prompts over any reader/writer pair.

use mongoadmin_core::error::AdminError;
use mongoadmin_core::Result;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};
use zeroize::Zeroizing;

fn io_failed(context: &str) -> impl FnOnce(io::Error) -> AdminError + '_ {
    move |source| AdminError::Io {
        context: context.to_string(),
        source,
    }
}

/// Prompt helper used by the interactive menu and the subcommands.
///
/// Secrets are read with `rpassword` when stdin is a terminal and as plain
/// lines otherwise, so scripted input and tests work the same way.
pub struct Console<R, W> {
    input: R,
    output: W,
    hidden_secrets: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let hidden_secrets = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            hidden_secrets,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary streams; secrets are read as plain lines.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hidden_secrets: false,
        }
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", line).map_err(io_failed("Failed to write to console"))
    }

    /// Prints `label` and reads one trimmed line. `None` means end of input.
    pub fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label).map_err(io_failed("Failed to write prompt"))?;
        self.output
            .flush()
            .map_err(io_failed("Failed to flush stdout before reading input"))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(io_failed("Failed to read input"))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask) but without echo on a terminal.
    ///
    /// Only the line terminator is stripped; surrounding spaces are part of
    /// the secret.
    pub fn ask_secret(&mut self, label: &str) -> Result<Option<Zeroizing<String>>> {
        if self.hidden_secrets {
            self.output
                .flush()
                .map_err(io_failed("Failed to flush stdout before reading password"))?;
            return match rpassword::prompt_password(label) {
                Ok(secret) => Ok(Some(Zeroizing::new(secret))),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
                Err(e) => Err(io_failed("Failed to read password")(e)),
            };
        }

        write!(self.output, "{}", label).map_err(io_failed("Failed to write prompt"))?;
        self.output
            .flush()
            .map_err(io_failed("Failed to flush stdout before reading password"))?;

        let mut line = Zeroizing::new(String::new());
        let read = self
            .input
            .read_line(&mut line)
            .map_err(io_failed("Failed to read password"))?;
        if read == 0 {
            return Ok(None);
        }
        let secret = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(Zeroizing::new(secret)))
    }

    /// The output stream.
    pub const fn output(&self) -> &W {
        &self.output
    }
}
