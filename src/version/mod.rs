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
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const MAX_NUMERIC_COMPONENTS: usize = 4;

/// Loosely structured release string such as `5.15.0-88-generic`,
/// `13.2-RELEASE-p4` or `17.0.5+8-LTS`.
///
/// Up to four leading numeric components are read; everything after the
/// first non-numeric component forms the flavor. Build metadata (after `+`)
/// and the original text are kept but never take part in equality, hashing
/// or ordering. A version without flavor ranks above the same numbers with
/// one.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
    revision: u32,
    flavor: Option<String>,
    build_metadata: Option<String>,
    source: String,
}

impl SemanticVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: 0,
            flavor: None,
            build_metadata: None,
            source: format!("{major}.{minor}.{patch}"),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let source = text.trim();
        if source.is_empty() {
            return Err(HostProbeError::InvalidVersionFormat(
                "version string is empty".to_string(),
            ));
        }

        let (main, build_metadata) = match source.split_once('+') {
            Some((main, build)) => (main, Some(build.to_string()).filter(|b| !b.is_empty())),
            None => (source, None),
        };

        let mut numbers = Vec::with_capacity(MAX_NUMERIC_COMPONENTS);
        let mut flavor_parts: Vec<&str> = Vec::new();

        for component in main.split(['.', '-', '_']).filter(|c| !c.is_empty()) {
            let number = component
                .bytes()
                .all(|b| b.is_ascii_digit())
                .then(|| component.parse::<u32>().ok())
                .flatten();
            match number {
                Some(n) if flavor_parts.is_empty() && numbers.len() < MAX_NUMERIC_COMPONENTS => {
                    numbers.push(n)
                }
                _ => flavor_parts.push(component),
            }
        }

        let component = |index: usize| numbers.get(index).copied().unwrap_or(0);

        Ok(Self {
            major: component(0),
            minor: component(1),
            patch: component(2),
            revision: component(3),
            flavor: (!flavor_parts.is_empty()).then(|| flavor_parts.join("-")),
            build_metadata,
            source: source.to_string(),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }

    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// The text this version was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn numeric_key(&self) -> (u32, u32, u32, u32) {
        (self.major, self.minor, self.patch, self.revision)
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.numeric_key() == other.numeric_key() && self.flavor == other.flavor
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric_key().hash(state);
        self.flavor.hash(state);
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric_key()
            .cmp(&other.numeric_key())
            .then_with(|| match (&self.flavor, &other.flavor) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for SemanticVersion {
    type Err = HostProbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        if let Some(flavor) = &self.flavor {
            write!(f, "-{flavor}")?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
