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

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Contents of an `/etc/os-release` style file.
///
/// Keys are case-insensitive. Missing keys are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    values: BTreeMap<String, String>,
}

impl OsRelease {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        log::debug!("Read release descriptor from {path:?}");
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut values = BTreeMap::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, raw_value)) = line.split_once('=') else {
                continue;
            };
            match unquote(raw_value.trim()) {
                Some(value) => {
                    values.insert(key.trim().to_uppercase(), value);
                }
                None => log::warn!(
                    "Skipping os-release line {}: unterminated quote in {line:?}",
                    number + 1
                ),
            }
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("NAME")
    }

    pub fn version(&self) -> Option<&str> {
        self.get("VERSION")
    }

    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }

    pub fn id_like(&self) -> Option<&str> {
        self.get("ID_LIKE")
    }

    pub fn pretty_name(&self) -> Option<&str> {
        self.get("PRETTY_NAME")
    }

    pub fn version_id(&self) -> Option<&str> {
        self.get("VERSION_ID")
    }

    pub fn version_codename(&self) -> Option<&str> {
        self.get("VERSION_CODENAME")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `None` when an opening quote is never closed.
fn unquote(value: &str) -> Option<String> {
    let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return Some(value.to_string());
    };

    let inner = value[1..].strip_suffix(quote)?;
    if quote == '"' {
        Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
    } else {
        Some(inner.to_string())
    }
}
