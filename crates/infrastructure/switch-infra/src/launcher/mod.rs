use std::process::Stdio;

use switch_core::EditorCommand;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Launch configuration error: {0}")]
    Config(String),
    #[error("Failed to start '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Starts editor processes without waiting on them.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `command` detached from our stdio and returns its pid once the OS has
    /// accepted it. The child is never waited on.
    pub fn launch(&self, command: &EditorCommand) -> Result<u32, LaunchError> {
        let program = command.program();
        if program.trim().is_empty() {
            return Err(LaunchError::Config(
                "Editor command has no executable".into(),
            ));
        }

        // Log the argv as a shell would need it so it can be pasted when debugging.
        let printable = shlex::try_join(command.argv().iter().map(String::as_str))
            .unwrap_or_else(|_| command.to_string());
        info!("Launching: {printable}");

        let child = std::process::Command::new(program)
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Io {
                program: program.to_string(),
                source,
            })?;

        let pid = child.id();
        debug!(pid, "Editor process started");
        Ok(pid)
    }
}
