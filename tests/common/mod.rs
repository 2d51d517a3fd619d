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

#![allow(dead_code)]

pub mod fixtures;

use hostprobe::HostProbeError;
use hostprobe::config::ProbeConfig;
use hostprobe::error::Result;
use hostprobe::platform::{CommandOutput, ProbeCommand, SystemExecutor};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Replays captured command output and file contents.
///
/// Commands are keyed by their full command line (`uname -a`). Anything not
/// registered behaves as if the program or file does not exist.
#[derive(Default)]
pub struct FixtureExecutor {
    commands: HashMap<String, CommandOutput>,
    files: HashMap<PathBuf, String>,
    calls: Mutex<Vec<String>>,
}

impl FixtureExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command_line: &str, output: &str) -> Self {
        self.commands
            .insert(command_line.to_string(), CommandOutput::success(output));
        self
    }

    pub fn with_failing_command(mut self, command_line: &str, status_code: i32, output: &str) -> Self {
        self.commands.insert(
            command_line.to_string(),
            CommandOutput {
                status_code: Some(status_code),
                output: output.to_string(),
            },
        );
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    /// Command lines and `cat <path>` entries, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, command_line: &str) -> usize {
        self.calls().iter().filter(|c| *c == command_line).count()
    }
}

impl SystemExecutor for FixtureExecutor {
    fn read_file(&self, path: &Path) -> Result<String> {
        self.calls.lock().unwrap().push(format!("cat {}", path.display()));
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()).into())
    }

    fn exec(&self, command: &ProbeCommand) -> Result<CommandOutput> {
        let command_line = command.to_string();
        self.calls.lock().unwrap().push(command_line.clone());
        self.commands
            .get(&command_line)
            .cloned()
            .ok_or_else(|| HostProbeError::CommandNotFound(command.program.clone()))
    }
}

/// Config whose well-known locations live in a private temporary directory,
/// so probes never see the real host.
pub struct ProbeSandbox {
    dir: TempDir,
    pub config: ProbeConfig,
}

impl ProbeSandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = ProbeConfig::default();
        config.paths.library_dir = dir.path().join("lib");
        config.paths.mapped_files_dir = dir.path().join("map_files");
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates an empty file in the sandboxed library directory.
    pub fn add_library(&self, name: &str) {
        let lib = &self.config.paths.library_dir;
        std::fs::create_dir_all(lib).unwrap();
        std::fs::write(lib.join(name), b"").unwrap();
    }
}
