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

use crate::error::HostProbeError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a HostProbeError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a HostProbeError) -> Self {
        let (suggestion, details) = match error {
            HostProbeError::UnrecognizedOperatingSystem(_) => {
                let suggestion = Some(
                    "Use one of: windows, macos, linux, freebsd, openbsd, netbsd, dragonflybsd, \
                     solaris, aix, android."
                        .to_string(),
                );
                (suggestion, None)
            }
            HostProbeError::UnrecognizedArchitecture(_) => {
                let suggestion = Some(
                    "Use one of: x32, x64, armel, armhf, arm64, riscv64, mips64le, s390x, \
                     ppc64le, ppc64."
                        .to_string(),
                );
                (suggestion, None)
            }
            HostProbeError::UnrecognizedAbi(_) => {
                (Some("Use one of: gnu, musl, msvc.".to_string()), None)
            }
            HostProbeError::MissingOperatingSystem(_) => {
                let suggestion = Some(
                    "File names and triples depend on the operating system. Construct the target \
                     with an explicit operating system."
                        .to_string(),
                );
                (suggestion, None)
            }
            HostProbeError::MissingArchitecture(_) => {
                let suggestion = Some(
                    "Triples depend on the hardware architecture. Construct the target with an \
                     explicit architecture."
                        .to_string(),
                );
                (suggestion, None)
            }
            HostProbeError::InvalidAbi { os, .. } => {
                let suggestion = match os.as_str() {
                    "linux" => Some("Linux supports the gnu and musl ABIs.".to_string()),
                    "windows" => Some("Windows supports the gnu and msvc ABIs.".to_string()),
                    _ => Some(format!("Leave the ABI unspecified for {os}.")),
                };
                (suggestion, None)
            }
            HostProbeError::UnsupportedTarget { convention, .. } => {
                let suggestion = if convention == "autoconf" {
                    Some(
                        "Autoconf triples exist for MinGW on Windows; use the gnu ABI or the \
                         rust triple instead."
                            .to_string(),
                    )
                } else {
                    None
                };
                (suggestion, None)
            }
            HostProbeError::InvalidTarget(token) => {
                let suggestion = Some(
                    "Target tokens look like '<os>[_<abi>]-<arch>' (e.g., 'linux_musl-x64' or \
                     'macos-arm64')."
                        .to_string(),
                );
                let details = Some(format!("Could not parse '{token}'"));
                (suggestion, details)
            }
            HostProbeError::InvalidVersionFormat(msg) => {
                let details = Some(format!("Invalid format: {msg}"));
                (None, details)
            }
            HostProbeError::Parse { format, message } => {
                let details = Some(format!("{format}: {message}"));
                (None, details)
            }
            HostProbeError::CommandNotFound(command) => {
                let suggestion = Some(format!(
                    "Ensure '{command}' is installed and available in your PATH."
                ));
                (suggestion, None)
            }
            HostProbeError::CommandTimeout { .. } => {
                let suggestion = Some(
                    "Increase command_timeout_secs in hostprobe.toml or set \
                     HOSTPROBE_COMMAND_TIMEOUT_SECS."
                        .to_string(),
                );
                (suggestion, None)
            }
            HostProbeError::NotDetected(what) => {
                let details = Some(format!(
                    "Every probe for the {what} returned no usable signal."
                ));
                (None, details)
            }
            HostProbeError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

pub fn format_error_chain(error: &HostProbeError) -> String {
    let mut output = ErrorContext::new(error).to_string();

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        output.push_str(&format!("\n\nCaused by: {cause}"));
        source = cause.source();
    }

    output
}
