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
use crate::models::Vocabulary;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Windows,
    MacOS,
    Linux,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFlyBsd,
    Solaris,
    Aix,
    Android,
    Any,
    Unknown,
}

impl OperatingSystem {
    pub fn resolve(raw: &str) -> Option<Self> {
        crate::models::resolve(raw)
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            OperatingSystem::Windows => "Windows",
            OperatingSystem::MacOS => "macOS",
            OperatingSystem::Linux => "Linux",
            OperatingSystem::FreeBsd => "FreeBSD",
            OperatingSystem::OpenBsd => "OpenBSD",
            OperatingSystem::NetBsd => "NetBSD",
            OperatingSystem::DragonFlyBsd => "DragonFlyBSD",
            OperatingSystem::Solaris => "Solaris",
            OperatingSystem::Aix => "AIX",
            OperatingSystem::Android => "Android",
            OperatingSystem::Any => "Any",
            OperatingSystem::Unknown => "Unknown",
        }
    }

    pub fn is_bsd(self) -> bool {
        matches!(
            self,
            OperatingSystem::FreeBsd
                | OperatingSystem::OpenBsd
                | OperatingSystem::NetBsd
                | OperatingSystem::DragonFlyBsd
        )
    }

    /// Unix-like systems that follow the `lib<name>.so` shared library convention.
    pub fn uses_shared_objects(self) -> bool {
        self.is_bsd()
            || matches!(
                self,
                OperatingSystem::Linux
                    | OperatingSystem::Android
                    | OperatingSystem::Solaris
                    | OperatingSystem::Aix
            )
    }
}

impl Vocabulary for OperatingSystem {
    const ALL: &'static [Self] = &[
        OperatingSystem::Windows,
        OperatingSystem::MacOS,
        OperatingSystem::Linux,
        OperatingSystem::FreeBsd,
        OperatingSystem::OpenBsd,
        OperatingSystem::NetBsd,
        OperatingSystem::DragonFlyBsd,
        OperatingSystem::Solaris,
        OperatingSystem::Aix,
        OperatingSystem::Android,
        OperatingSystem::Any,
        OperatingSystem::Unknown,
    ];

    fn token(self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOS => "macos",
            OperatingSystem::Linux => "linux",
            OperatingSystem::FreeBsd => "freebsd",
            OperatingSystem::OpenBsd => "openbsd",
            OperatingSystem::NetBsd => "netbsd",
            OperatingSystem::DragonFlyBsd => "dragonflybsd",
            OperatingSystem::Solaris => "solaris",
            OperatingSystem::Aix => "aix",
            OperatingSystem::Android => "android",
            OperatingSystem::Any => "any",
            OperatingSystem::Unknown => "unknown",
        }
    }

    fn output_aliases(self) -> &'static [&'static str] {
        match self {
            OperatingSystem::MacOS => &["osx", "darwin"],
            OperatingSystem::Solaris => &["sun"],
            _ => &[],
        }
    }

    fn input_aliases(self) -> &'static [&'static str] {
        match self {
            OperatingSystem::Windows => &["win"],
            OperatingSystem::MacOS => &["mac"],
            OperatingSystem::Solaris => &["sunos", "illumos"],
            OperatingSystem::DragonFlyBsd => &["dragonfly"],
            _ => &[],
        }
    }

    fn is_sentinel(self) -> bool {
        matches!(self, OperatingSystem::Any | OperatingSystem::Unknown)
    }
}

impl FromStr for OperatingSystem {
    type Err = HostProbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s).ok_or_else(|| HostProbeError::UnrecognizedOperatingSystem(s.to_string()))
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
