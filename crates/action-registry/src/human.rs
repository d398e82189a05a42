//! Human-in-the-loop verification code prompt

use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

const BANNER_RULE: &str = "==================================================";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HumanInputError {
    #[error("no verification code provided")]
    NoCodeProvided,
    #[error("console unavailable: {0}")]
    Io(String),
}

/// Source of a verification code typed by a human.
///
/// Reading blocks the calling thread until one line arrives; there is no
/// timeout and no retry.
pub trait CodePrompt: Send + Sync {
    fn request_code(&self) -> Result<String, HumanInputError>;
}

/// Prompt over any line reader and writer.
pub struct LineCodePrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> LineCodePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }
}

impl<R, W> CodePrompt for LineCodePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn request_code(&self) -> Result<String, HumanInputError> {
        let mut guard = self.io.lock();
        let (reader, writer) = &mut *guard;
        read_code(reader, writer)
    }
}

/// Print the banner, read exactly one line and validate it.
pub fn read_code<R, W>(reader: &mut R, writer: &mut W) -> Result<String, HumanInputError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let io_err = |err: io::Error| HumanInputError::Io(err.to_string());

    writeln!(writer, "\n{}", BANNER_RULE).map_err(io_err)?;
    writeln!(writer, "--- HUMAN ACTION REQUIRED ---").map_err(io_err)?;
    write!(writer, "Enter the verification code you received by SMS: ").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    let mut line = String::new();
    reader.read_line(&mut line).map_err(io_err)?;
    writeln!(writer, "{}\n", BANNER_RULE).map_err(io_err)?;

    let code = line.trim();
    if code.is_empty() {
        warn!("no verification code received");
        return Err(HumanInputError::NoCodeProvided);
    }
    info!("verification code received");
    Ok(code.to_string())
}

/// Prompt on the process console. The banner goes to stderr so stdout only
/// carries command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleCodePrompt;

impl CodePrompt for ConsoleCodePrompt {
    fn request_code(&self) -> Result<String, HumanInputError> {
        read_code(&mut io::stdin().lock(), &mut io::stderr())
    }
}
