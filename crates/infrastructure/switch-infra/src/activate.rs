//! Best-effort foregrounding of an editor window after launch.
//!
//! Only implemented on Windows, where a freshly started editor often opens behind the
//! host. Everything here is cosmetic: failures and timeouts are logged and dropped.

use std::future::Future;
use std::io;
use std::process::Stdio;
use std::time::Duration;

use switch_config::{ACTIVATION_PROCESS_WAIT, ACTIVATION_TIMEOUT, QUICK_ACTIVATION_TIMEOUT};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMode {
    /// Looks up the newest matching process that owns a main window.
    Thorough,
    /// One `SetForegroundWindow` call, for latency-sensitive paths.
    Quick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Completed,
    Failed,
    TimedOut,
    /// Nothing to do on this platform.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct WindowActivator {
    thorough_limit: Duration,
    process_limit: Duration,
    quick_limit: Duration,
}

impl Default for WindowActivator {
    fn default() -> Self {
        Self {
            thorough_limit: ACTIVATION_TIMEOUT,
            process_limit: ACTIVATION_PROCESS_WAIT,
            quick_limit: QUICK_ACTIVATION_TIMEOUT,
        }
    }
}

impl WindowActivator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs activation on the current tokio runtime. Callers normally drop the handle.
    pub fn spawn(&self, target: &str, mode: ActivationMode) -> JoinHandle<ActivationOutcome> {
        let activator = self.clone();
        let target = target.to_string();
        tokio::spawn(async move { activator.activate(&target, mode).await })
    }

    /// Tries to bring the window of process `target` to the front.
    pub async fn activate(&self, target: &str, mode: ActivationMode) -> ActivationOutcome {
        if !cfg!(target_os = "windows") {
            return ActivationOutcome::Skipped;
        }

        let (script, overall, child_limit) = match mode {
            ActivationMode::Thorough => (
                thorough_script(target),
                self.thorough_limit,
                self.process_limit,
            ),
            ActivationMode::Quick => (quick_script(target), self.quick_limit, self.quick_limit),
        };

        let mut command = tokio::process::Command::new("powershell");
        command.args(["-NoProfile", "-NonInteractive"]);
        if mode == ActivationMode::Quick {
            command.args(["-WindowStyle", "Hidden"]);
        }
        command
            .args(["-Command", &script])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let outcome = bounded(overall, run_child(command, child_limit)).await;
        debug!(process = target, ?mode, ?outcome, "Window activation finished");
        outcome
    }
}

async fn run_child(
    mut command: tokio::process::Command,
    limit: Duration,
) -> io::Result<ActivationOutcome> {
    let mut child = command.spawn()?;
    match tokio::time::timeout(limit, child.wait()).await {
        Ok(status) => Ok(if status?.success() {
            ActivationOutcome::Completed
        } else {
            ActivationOutcome::Failed
        }),
        Err(_) => {
            child.kill().await?;
            Ok(ActivationOutcome::TimedOut)
        }
    }
}

/// Caps an activation attempt. Dropping the attempt on timeout kills its child.
pub(crate) async fn bounded<F>(limit: Duration, attempt: F) -> ActivationOutcome
where
    F: Future<Output = io::Result<ActivationOutcome>>,
{
    match tokio::time::timeout(limit, attempt).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            debug!("Window activation failed: {e}");
            ActivationOutcome::Failed
        }
        Err(_) => ActivationOutcome::TimedOut,
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub(crate) fn thorough_script(process_name: &str) -> String {
    format!(
        "Get-Process | Where-Object {{ $_.ProcessName -eq {name} -and $_.MainWindowHandle -ne 0 }} \
         | Sort-Object StartTime -Descending | Select-Object -First 1 \
         | ForEach-Object {{ (New-Object -ComObject WScript.Shell).AppActivate($_.Id) }}",
        name = quote(process_name)
    )
}

pub(crate) fn quick_script(process_name: &str) -> String {
    format!(
        "Add-Type -TypeDefinition 'using System; using System.Runtime.InteropServices; \
         public class SwitchWin32 {{ [DllImport(\"user32.dll\")] public static extern bool SetForegroundWindow(IntPtr hWnd); }}'; \
         $p = Get-Process -Name {name} -ErrorAction SilentlyContinue | Where-Object {{ $_.MainWindowHandle -ne 0 }} | Select-Object -First 1; \
         if ($p) {{ [SwitchWin32]::SetForegroundWindow($p.MainWindowHandle) | Out-Null }}",
        name = quote(process_name)
    )
}

/// Process name to look for, derived from an executable path or bare command.
pub fn process_name(executable: &str) -> String {
    let file = executable
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(executable);
    let stem = file
        .strip_suffix(".exe")
        .or_else(|| file.strip_suffix(".EXE"))
        .unwrap_or(file);
    stem.to_string()
}
