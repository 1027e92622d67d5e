//! Lint collaborators: anything that can produce a lint report.
//!
//! The score extractor only ever sees a [`LintReport`]. Where the lines come
//! from (a live linter run, a saved report, stdin) is decided by which
//! [`Linter`] the caller hands it.

use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

/// Ordered lines of one linter run, exactly as the tool printed them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LintReport {
    lines: Vec<String>,
}

impl LintReport {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split raw tool output into report lines. A trailing newline does not
    /// produce an extra empty line.
    pub fn from_output(output: &str) -> Self {
        Self::new(output.lines().map(str::to_string).collect())
    }

    /// Decode raw bytes the same way for every source. Invalid UTF-8 (a
    /// Latin-1 module path, say) is replaced rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_output(&String::from_utf8_lossy(bytes))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Errors produced while obtaining a lint report.
#[derive(Debug)]
pub enum LintError {
    /// Failed to execute the lint command.
    Execute {
        command: String,
        source: std::io::Error,
    },
    /// Lint command exited with a fatal status, or was killed by a signal.
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    /// Failed to read a saved report.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for LintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintError::Execute { command, source } => {
                write!(f, "failed to execute lint command '{command}': {source}")
            }
            LintError::CommandFailed {
                command,
                code,
                stderr,
            } => {
                match code {
                    Some(code) => {
                        write!(f, "lint command '{command}' failed with exit code {code}")?
                    }
                    None => write!(f, "lint command '{command}' was terminated by a signal")?,
                }
                if !stderr.trim().is_empty() {
                    write!(
                        f,
                        ":\n{}",
                        stderr.lines().take(30).collect::<Vec<_>>().join("\n")
                    )?;
                }
                Ok(())
            }
            LintError::Read { path, source } => {
                write!(f, "failed to read lint report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LintError::Execute { source, .. } => Some(source),
            LintError::CommandFailed { .. } => None,
            LintError::Read { source, .. } => Some(source),
        }
    }
}

/// Produces the full textual report of a lint run, one entry per line.
pub trait Linter {
    /// Human-readable description of where the report comes from.
    fn describe(&self) -> String;

    fn lint_all(&self) -> Result<LintReport, LintError>;
}

/// Runs a lint command through `sh -c` and captures its stdout.
///
/// Linters like pylint encode the categories of issued messages in their
/// exit status, so a non-zero exit only counts as failure when the code is
/// listed in `fatal_exit_codes` or the process died from a signal.
pub struct CommandLinter {
    command: String,
    working_dir: PathBuf,
    fatal_exit_codes: Vec<i32>,
}

impl CommandLinter {
    pub fn new(command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
            fatal_exit_codes: Vec::new(),
        }
    }

    pub fn with_fatal_exit_codes(mut self, codes: Vec<i32>) -> Self {
        self.fatal_exit_codes = codes;
        self
    }
}

impl Linter for CommandLinter {
    fn describe(&self) -> String {
        format!("`{}` in {}", self.command, self.working_dir.display())
    }

    fn lint_all(&self) -> Result<LintReport, LintError> {
        tracing::info!(
            command = %self.command,
            dir = %self.working_dir.display(),
            "running linter"
        );
        let output = Command::new("sh")
            .args(["-c", &self.command])
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| LintError::Execute {
                command: self.command.clone(),
                source: e,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!(stderr = %stderr.trim_end(), "linter wrote to stderr");
        }

        let code = output.status.code();
        let fatal = match code {
            Some(c) => self.fatal_exit_codes.contains(&c),
            None => true,
        };
        if fatal {
            return Err(LintError::CommandFailed {
                command: self.command.clone(),
                code,
                stderr: stderr.into_owned(),
            });
        }

        let report = LintReport::from_bytes(&output.stdout);
        tracing::debug!(lines = report.len(), exit_code = ?code, "linter finished");
        Ok(report)
    }
}

/// Reads a previously saved lint report from disk.
pub struct FileLinter {
    path: PathBuf,
}

impl FileLinter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Linter for FileLinter {
    fn describe(&self) -> String {
        format!("report file {}", self.path.display())
    }

    fn lint_all(&self) -> Result<LintReport, LintError> {
        tracing::debug!(path = %self.path.display(), "reading saved lint report");
        let bytes = std::fs::read(&self.path).map_err(|e| LintError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(LintReport::from_bytes(&bytes))
    }
}

/// Hands back the same report on every call.
pub struct StaticLinter {
    report: LintReport,
}

impl StaticLinter {
    pub fn new(report: LintReport) -> Self {
        Self { report }
    }

    /// Slurp a report from any reader (stdin in practice).
    pub fn from_reader(mut reader: impl Read) -> Result<Self, LintError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| LintError::Read {
                path: PathBuf::from("-"),
                source: e,
            })?;
        Ok(Self::new(LintReport::from_bytes(&bytes)))
    }
}

impl Linter for StaticLinter {
    fn describe(&self) -> String {
        "standard input".to_string()
    }

    fn lint_all(&self) -> Result<LintReport, LintError> {
        Ok(self.report.clone())
    }
}
