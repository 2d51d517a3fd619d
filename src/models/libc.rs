use crate::models::{Abi, Vocabulary};
use serde::{Deserialize, Serialize};

/// C standard library family found on a Linux host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibC {
    Glibc,
    Musl,
    Uclibc,
}

impl LibC {
    pub fn resolve(raw: &str) -> Option<Self> {
        crate::models::resolve(raw)
    }

    pub fn abi(self) -> Option<Abi> {
        match self {
            LibC::Glibc => Some(Abi::Gnu),
            LibC::Musl => Some(Abi::Musl),
            LibC::Uclibc => None,
        }
    }
}

impl Vocabulary for LibC {
    const ALL: &'static [Self] = &[LibC::Glibc, LibC::Musl, LibC::Uclibc];

    fn token(self) -> &'static str {
        match self {
            LibC::Glibc => "glibc",
            LibC::Musl => "musl",
            LibC::Uclibc => "uclibc",
        }
    }
}

impl std::fmt::Display for LibC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
