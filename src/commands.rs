use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Errors raised when running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Seam over external command execution so refresh logic can be tested
/// without spawning processes.
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` and resolve with its standard output as
    /// text. Rejects on spawn failure or non-zero exit.
    fn exec(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl std::future::Future<Output = Result<String, CommandError>> + Send;
}

/// Executor backed by real processes via tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    async fn exec(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        debug!("Executing command: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "Command failed: {} {} (exit code: {:?})",
                program,
                args.join(" "),
                output.status.code()
            );
            warn!("stderr: {}", stderr);
            return Err(CommandError::Failed {
                program: program.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        debug!("Command succeeded: {} {}", program, args.join(" "));
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exec_captures_stdout() {
        let out = SystemExecutor.exec("echo", &["hello"]).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_exec_nonzero_exit_is_error() {
        let err = SystemExecutor.exec("false", &[]).await.unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_exec_missing_program_is_error() {
        let err = SystemExecutor
            .exec("nonexistent_command_xyz123", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
