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

use crate::error::{HostProbeError, Result};
use serde::Serialize;

const MIN_FIELDS: usize = 5;

/// One line of `uname -a` output.
///
/// Two layouts exist. GNU coreutils appends processor, hardware platform
/// and operating system after the machine (`... x86_64 x86_64 x86_64
/// GNU/Linux`); everyone else ends with the machine. Everything between the
/// release and the machine is the kernel build descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uname {
    pub sysname: String,
    pub nodename: String,
    /// Kernel release, e.g. `5.15.0-88-generic`.
    pub version: String,
    /// Kernel build descriptor, e.g. `#98-Ubuntu SMP Mon Oct 2 15:18:56 UTC 2023`.
    pub build_descriptor: String,
    pub machine: String,
    pub processor: Option<String>,
    pub hardware_platform: Option<String>,
    pub operating_system: Option<String>,
    pub source: String,
}

impl Uname {
    pub fn parse(output: &str) -> Result<Self> {
        let parts: Vec<&str> = output.split_whitespace().collect();
        if parts.len() < MIN_FIELDS {
            return Err(HostProbeError::Parse {
                format: "uname",
                message: format!(
                    "expected at least {MIN_FIELDS} fields, found {}",
                    parts.len()
                ),
            });
        }

        let len = parts.len();
        let last = parts[len - 1];
        let join = |from: usize, to: usize| -> String {
            parts.get(from..to).map(|p| p.join(" ")).unwrap_or_default()
        };

        let (build_descriptor, machine, processor, hardware_platform, operating_system);

        if last.starts_with("GNU") && len > MIN_FIELDS {
            operating_system = Some(last.to_string());

            // The descriptor ends with a timestamp whose last field is the year.
            let year = (3..=len - 2)
                .rev()
                .find(|&i| parts[i].len() == 4 && parts[i].bytes().all(|b| b.is_ascii_digit()));
            let after_year = year.map(|y| (y, (len - 2) - y));

            match after_year {
                Some((year, count @ 1..=3)) => {
                    build_descriptor = join(3, year + 1);
                    machine = parts[year + 1].to_string();
                    processor = (count >= 2).then(|| parts[year + 2].to_string());
                    hardware_platform = (count == 3).then(|| parts[year + 3].to_string());
                }
                _ => {
                    log::debug!("No build year in GNU uname output, using trailing fields");
                    build_descriptor = join(3, len - 2);
                    machine = parts[len - 2].to_string();
                    processor = None;
                    hardware_platform = None;
                }
            }
        } else {
            build_descriptor = join(3, len - 1);
            machine = last.to_string();
            processor = None;
            hardware_platform = None;
            operating_system = None;
        }

        Ok(Self {
            sysname: parts[0].to_string(),
            nodename: parts[1].to_string(),
            version: parts[2].to_string(),
            build_descriptor,
            machine,
            processor,
            hardware_platform,
            operating_system,
            source: output.to_string(),
        })
    }

    /// Fields that identify the platform, without the host name and
    /// build descriptor noise.
    pub fn platform_text(&self) -> String {
        [
            Some(self.sysname.as_str()),
            self.operating_system.as_deref(),
            Some(self.machine.as_str()),
            self.hardware_platform.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}
