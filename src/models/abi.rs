use crate::error::{HostProbeError, Result};
use crate::models::{OperatingSystem, Vocabulary};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// C library flavour on Linux, compiler runtime flavour on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Abi {
    Gnu,
    Musl,
    Msvc,
}

impl Abi {
    pub fn resolve(raw: &str) -> Option<Self> {
        crate::models::resolve(raw)
    }

    pub fn is_valid_for(self, os: OperatingSystem) -> bool {
        match self {
            Abi::Gnu => matches!(os, OperatingSystem::Linux | OperatingSystem::Windows),
            Abi::Musl => os == OperatingSystem::Linux,
            Abi::Msvc => os == OperatingSystem::Windows,
        }
    }
}

impl Vocabulary for Abi {
    const ALL: &'static [Self] = &[Abi::Gnu, Abi::Musl, Abi::Msvc];

    fn token(self) -> &'static str {
        match self {
            Abi::Gnu => "gnu",
            Abi::Musl => "musl",
            Abi::Msvc => "msvc",
        }
    }

    fn output_aliases(self) -> &'static [&'static str] {
        match self {
            Abi::Gnu => &["glibc"],
            _ => &[],
        }
    }

    fn input_aliases(self) -> &'static [&'static str] {
        match self {
            Abi::Gnu => &["mingw"],
            _ => &[],
        }
    }
}

impl FromStr for Abi {
    type Err = HostProbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s).ok_or_else(|| HostProbeError::UnrecognizedAbi(s.to_string()))
    }
}

impl std::fmt::Display for Abi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
