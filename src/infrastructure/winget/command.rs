use crate::domain::entities::OperationKind;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start process: {0}")]
    Launch(#[from] std::io::Error),
    /// Anything on stderr counts as failure, whatever the exit code says;
    /// winget reports real errors there while still exiting zero at times.
    #[error("{0}")]
    Execution(String),
    #[error("command was cancelled")]
    Cancelled,
}

pub struct WingetCommand;

impl WingetCommand {
    pub fn search_command(tool: &str, term: &str) -> String {
        format!("{} search \"{}\"", tool, term)
    }

    pub fn list_command(tool: &str) -> String {
        format!("{} list", tool)
    }

    pub fn operation_command(tool: &str, kind: OperationKind, package_id: &str) -> String {
        format!(
            "{} {} --id \"{}\" --silent --accept-source-agreements --accept-package-agreements",
            tool,
            kind.verb(),
            package_id
        )
    }

    /// Run one command line through the system shell and capture its full
    /// output. Cancelling the token kills the child and discards whatever
    /// was captured so far.
    pub async fn execute(
        command: &str,
        token: &CancellationToken,
    ) -> Result<String, CommandError> {
        if command.trim().is_empty() {
            return Ok(String::new());
        }

        tracing::debug!("Running: {}", command);

        let mut shell = if cfg!(windows) {
            let mut shell = Command::new("cmd");
            shell.arg("/C");
            shell
        } else {
            let mut shell = Command::new("sh");
            shell.arg("-c");
            shell
        };

        let child = shell
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Cancelled: {}", command);
                return Err(CommandError::Cancelled);
            }
            output = child.wait_with_output() => output?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stderr.is_empty() {
            tracing::debug!("Command wrote {} bytes to stderr", stderr.len());
            return Err(CommandError::Execution(stderr));
        }

        Ok(stdout)
    }
}
