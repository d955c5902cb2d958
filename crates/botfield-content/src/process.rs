//! External-process generator.
//!
//! Runs a command (by default `ollama run <model>`), feeds the prompt on
//! stdin and reads the completion from stdout. The child is killed if it
//! outlives the timeout.

use crate::generator::{GenerateError, GenerateResult, TextGenerator};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Generator backed by a local command-line program.
///
/// # Example
///
/// ```rust,ignore
/// use botfield_content::{ProcessGenerator, TextGenerator};
///
/// let generator = ProcessGenerator::ollama("llama2");
/// let text = generator.generate("Write one post.", Duration::from_secs(60)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    program: String,
    args: Vec<String>,
}

impl ProcessGenerator {
    /// Create a generator for an arbitrary program.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `ollama run <model>`.
    pub fn ollama(model: &str) -> Self {
        Self::new("ollama", vec!["run".to_string(), model.to_string()])
    }

    /// Build from a full command line, program first.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// The program and its arguments, for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl TextGenerator for ProcessGenerator {
    fn name(&self) -> &str {
        "process"
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> GenerateResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        debug!(command = %self.command_line(), "spawned generator process");

        let mut stdin = child.stdin.take();
        let prompt = prompt.to_string();
        let run = async move {
            if let Some(stdin) = stdin.as_mut() {
                // A program that ignores its input may close the pipe early.
                if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
            }
            drop(stdin);
            child.wait_with_output().await
        };

        // Dropping `run` on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, run).await {
            Ok(result) => result?,
            Err(_) => return Err(GenerateError::Timeout(timeout)),
        };

        if !output.status.success() {
            return Err(GenerateError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> ProcessGenerator {
        ProcessGenerator::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_command_construction() {
        let generator = ProcessGenerator::ollama("mistral");
        assert_eq!(generator.command_line(), "ollama run mistral");

        let custom = ProcessGenerator::from_command(&["llm".into(), "-m".into(), "tiny".into()]).unwrap();
        assert_eq!(custom.command_line(), "llm -m tiny");
        assert!(ProcessGenerator::from_command(&[]).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_prompt_goes_to_stdin() {
        let output = sh("cat")
            .generate("hello from stdin", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output, "hello from stdin");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let err = sh("echo broken >&2; exit 3")
            .generate("ignored", Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            GenerateError::NonZeroExit { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_process_times_out() {
        let err = sh("sleep 5")
            .generate("ignored", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let err = ProcessGenerator::new("botfield-no-such-program", vec![])
            .generate("ignored", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Io(_)));
    }
}
