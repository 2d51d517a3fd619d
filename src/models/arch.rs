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
pub enum HardwareArchitecture {
    X32,
    X64,
    /// 32-bit ARM, soft-float calling convention.
    Armel,
    /// 32-bit ARM, hard-float calling convention.
    Armhf,
    Arm64,
    Riscv64,
    Mips64le,
    S390x,
    Ppc64le,
    Ppc64,
    Any,
    Unknown,
}

impl HardwareArchitecture {
    pub fn resolve(raw: &str) -> Option<Self> {
        crate::models::resolve(raw)
    }

    /// Raw ARM names that do not resolve to a concrete architecture, such as
    /// `arm`, `aarch32` or `armv6l`. These cannot tell the two 32-bit ARM
    /// conventions apart.
    pub fn is_ambiguous_arm(raw: &str) -> bool {
        let raw = raw.trim().to_lowercase();
        (raw.contains("arm") || raw.contains("aarch32")) && Self::resolve(&raw).is_none()
    }

    pub fn is_arm32(self) -> bool {
        matches!(self, HardwareArchitecture::Armel | HardwareArchitecture::Armhf)
    }
}

impl Vocabulary for HardwareArchitecture {
    const ALL: &'static [Self] = &[
        HardwareArchitecture::X32,
        HardwareArchitecture::X64,
        HardwareArchitecture::Armel,
        HardwareArchitecture::Armhf,
        HardwareArchitecture::Arm64,
        HardwareArchitecture::Riscv64,
        HardwareArchitecture::Mips64le,
        HardwareArchitecture::S390x,
        HardwareArchitecture::Ppc64le,
        HardwareArchitecture::Ppc64,
        HardwareArchitecture::Any,
        HardwareArchitecture::Unknown,
    ];

    fn token(self) -> &'static str {
        match self {
            HardwareArchitecture::X32 => "x32",
            HardwareArchitecture::X64 => "x64",
            HardwareArchitecture::Armel => "armel",
            HardwareArchitecture::Armhf => "armhf",
            HardwareArchitecture::Arm64 => "arm64",
            HardwareArchitecture::Riscv64 => "riscv64",
            HardwareArchitecture::Mips64le => "mips64le",
            HardwareArchitecture::S390x => "s390x",
            HardwareArchitecture::Ppc64le => "ppc64le",
            HardwareArchitecture::Ppc64 => "ppc64",
            HardwareArchitecture::Any => "any",
            HardwareArchitecture::Unknown => "unknown",
        }
    }

    fn output_aliases(self) -> &'static [&'static str] {
        match self {
            HardwareArchitecture::X32 => &["i386", "i586", "i686"],
            HardwareArchitecture::X64 => &["x86_64", "amd64"],
            HardwareArchitecture::Arm64 => &["aarch64"],
            HardwareArchitecture::Mips64le => &["mips64el"],
            _ => &[],
        }
    }

    fn input_aliases(self) -> &'static [&'static str] {
        match self {
            HardwareArchitecture::X32 => &["x86"],
            HardwareArchitecture::Armel => &["arm32v5", "arm32v6"],
            HardwareArchitecture::Armhf => &["arm32v7", "armv7l", "armv7"],
            HardwareArchitecture::Arm64 => &["arm64v8"],
            HardwareArchitecture::Riscv64 => &["riscv64gc"],
            _ => &[],
        }
    }

    fn is_sentinel(self) -> bool {
        matches!(self, HardwareArchitecture::Any | HardwareArchitecture::Unknown)
    }
}

impl FromStr for HardwareArchitecture {
    type Err = HostProbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s).ok_or_else(|| HostProbeError::UnrecognizedArchitecture(s.to_string()))
    }
}

impl std::fmt::Display for HardwareArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reported_machines() {
        let cases = [
            ("x86_64", HardwareArchitecture::X64),
            ("AMD64", HardwareArchitecture::X64),
            ("i686", HardwareArchitecture::X32),
            ("x86", HardwareArchitecture::X32),
            ("aarch64", HardwareArchitecture::Arm64),
            ("armv7l", HardwareArchitecture::Armhf),
            ("riscv64", HardwareArchitecture::Riscv64),
            ("ppc64le", HardwareArchitecture::Ppc64le),
            ("ppc64", HardwareArchitecture::Ppc64),
            ("s390x", HardwareArchitecture::S390x),
            ("mips64el", HardwareArchitecture::Mips64le),
        ];
        for (raw, expected) in cases {
            assert_eq!(HardwareArchitecture::resolve(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_ambiguous_arm() {
        assert!(HardwareArchitecture::is_ambiguous_arm("arm"));
        assert!(HardwareArchitecture::is_ambiguous_arm("AArch32"));
        assert!(HardwareArchitecture::is_ambiguous_arm("armv6l"));
        assert!(HardwareArchitecture::is_ambiguous_arm("armv5tel"));
        assert!(!HardwareArchitecture::is_ambiguous_arm("armhf"));
        assert!(!HardwareArchitecture::is_ambiguous_arm("armv7l"));
        assert!(!HardwareArchitecture::is_ambiguous_arm("arm64"));
        assert!(!HardwareArchitecture::is_ambiguous_arm("aarch64"));
        assert!(!HardwareArchitecture::is_ambiguous_arm("x86_64"));
        assert_eq!(HardwareArchitecture::resolve("arm"), None);
    }

    #[test]
    fn test_aliases_canonical_first() {
        assert_eq!(
            HardwareArchitecture::X64.aliases(),
            vec!["x64", "x86_64", "amd64"]
        );
        assert_eq!(
            HardwareArchitecture::X32.aliases(),
            vec!["x32", "i386", "i586", "i686"]
        );
        assert_eq!(HardwareArchitecture::Armhf.aliases(), vec!["armhf"]);
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!(
            "amd64".parse::<HardwareArchitecture>().unwrap(),
            HardwareArchitecture::X64
        );
        assert!("sparc".parse::<HardwareArchitecture>().is_err());
        assert_eq!(HardwareArchitecture::Mips64le.to_string(), "mips64le");
        assert!(HardwareArchitecture::Armel.is_arm32());
        assert!(!HardwareArchitecture::Arm64.is_arm32());
    }
}
