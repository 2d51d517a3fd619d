// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Access to the host's commands and files.
//!
//! Probes never spawn processes or read files directly. They go through a
//! [`SystemExecutor`], so detection can be replayed against captured output.

use crate::config::ProbeConfig;
use crate::error::{HostProbeError, Result};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ProbeCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status and combined stdout/stderr of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub status_code: Option<i32>,
    pub output: String,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status_code: Some(0),
            output: output.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Some(0)
    }

    /// The captured text, or `CommandFailed` for a non-zero exit.
    pub fn into_success(self, command: &ProbeCommand) -> Result<String> {
        if self.is_success() {
            return Ok(self.output);
        }

        let status = self
            .status_code
            .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {code}"));
        Err(HostProbeError::CommandFailed {
            command: command.to_string(),
            message: format!("{status}: {}", self.output.trim()),
        })
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SystemExecutor: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Runs the command to completion. A missing program is reported as
    /// `CommandNotFound`; a non-zero exit is not an error at this level.
    fn exec(&self, command: &ProbeCommand) -> Result<CommandOutput>;
}

impl dyn SystemExecutor + '_ {
    /// Runs the command and requires a zero exit status.
    pub fn exec_success(&self, command: &ProbeCommand) -> Result<String> {
        self.exec(command)?.into_success(command)
    }
}

/// Runs commands on this machine.
#[derive(Debug, Clone, Default)]
pub struct LocalExecutor {
    timeout: Option<Duration>,
}

impl LocalExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.command_timeout())
    }

    fn wait(
        &self,
        child: &mut Child,
        command: &ProbeCommand,
        deadline: Option<Instant>,
    ) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if let (Some(timeout), Some(deadline)) = (self.timeout, deadline)
                        && Instant::now() >= deadline
                    {
                        let _ = child.kill();
                        let _ = child.wait();
                        log::warn!("Killed '{command}' after {} seconds", timeout.as_secs());
                        return Err(HostProbeError::CommandTimeout {
                            command: command.to_string(),
                            timeout_secs: timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(HostProbeError::CommandFailed {
                        command: command.to_string(),
                        message: format!("Failed to wait for command: {e}"),
                    });
                }
            }
        }
    }
}

impl SystemExecutor for LocalExecutor {
    fn read_file(&self, path: &Path) -> Result<String> {
        log::trace!("Reading {path:?}");
        Ok(fs::read_to_string(path)?)
    }

    fn exec(&self, command: &ProbeCommand) -> Result<CommandOutput> {
        let program = which::which(&command.program)
            .map_err(|_| HostProbeError::CommandNotFound(command.program.clone()))?;
        log::debug!("Executing '{command}' via {program:?}");

        let mut child = Command::new(&program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HostProbeError::CommandFailed {
                command: command.to_string(),
                message: format!("Failed to spawn command: {e}"),
            })?;

        // Pipes are drained concurrently so a chatty child cannot block on a
        // full pipe while we poll for its exit.
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait(&mut child, command, deadline)?;

        // A background process started by the command can inherit the pipes
        // and hold them open, so reading stops at the deadline too.
        let mut output = collect(stdout, deadline);
        output.push_str(&collect(stderr, deadline));
        log::trace!("'{command}' exited with {status}");

        Ok(CommandOutput {
            status_code: status.code(),
            output,
        })
    }
}

/// A pipe being read on its own thread into a shared buffer.
struct PipeReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> PipeReader {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let handle = thread::spawn(move || {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => sink
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("Failed to read command output: {e}");
                    break;
                }
            }
        }
    });
    PipeReader { buffer, handle }
}

/// Waits for the reader to reach end of file, or until `deadline`. A reader
/// still blocked at the deadline is left behind and whatever it has read so
/// far is returned.
fn collect(reader: Option<PipeReader>, deadline: Option<Instant>) -> String {
    let Some(PipeReader { buffer, handle }) = reader else {
        return String::new();
    };

    match deadline {
        None => {
            let _ = handle.join();
        }
        Some(deadline) => {
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(POLL_INTERVAL);
            }
            if !handle.is_finished() {
                log::debug!("Command output is still open at the deadline, keeping what was read");
            }
        }
    }

    let bytes = buffer.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes[..]).into_owned()
}
