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

//! Dynamic linker traces (`ldd <binary>`) and C library version banners.

use crate::models::LibC;
use regex::Regex;
use std::sync::LazyLock;

/// `GNU C Library (Ubuntu GLIBC 2.35-0ubuntu3.1) stable release version 2.35.`
static GLIBC_VERSION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*GNU C Library\b.*?\bversion (\d+\.\d+)\b").ok());

/// `musl libc (x86_64)` followed by `Version 1.2.2`.
static MUSL_VERSION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*musl libc\b.*\r?\n\s*Version (\d+\.\d+\.\d+)").ok());

/// The C library a binary is linked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibCPath {
    pub libc: LibC,
    pub path: String,
}

/// Finds the C library dependency in `ldd` output, e.g.
/// `libc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f...)`.
pub fn parse_libc_path(ldd_output: &str) -> Option<LibCPath> {
    ldd_output.lines().find_map(|line| {
        let (name, target) = line.split_once("=>")?;
        let libc = library_family(name.trim())?;
        let path = target.split_whitespace().next()?;
        Some(LibCPath {
            libc,
            path: path.to_string(),
        })
    })
}

fn library_family(library_name: &str) -> Option<LibC> {
    let name = library_name.to_lowercase();
    if name.starts_with("libc.so") {
        Some(LibC::Glibc)
    } else if name.starts_with("libc.musl") {
        Some(LibC::Musl)
    } else if name.starts_with("libuclibc.so") {
        Some(LibC::Uclibc)
    } else {
        None
    }
}

/// Guesses the family from any ldd or library banner text.
pub fn detect_libc_family(output: &str) -> Option<LibC> {
    let output = output.to_lowercase();
    if output.contains("musl") {
        Some(LibC::Musl)
    } else if output.contains("uclibc") {
        Some(LibC::Uclibc)
    } else if output.contains("gnu") || output.contains("glibc") {
        Some(LibC::Glibc)
    } else {
        None
    }
}

/// Extracts the version from the banner a C library prints when executed
/// directly. glibc reports two components, musl three. uClibc prints none.
pub fn parse_libc_version(banner: &str) -> Option<String> {
    [&*GLIBC_VERSION, &*MUSL_VERSION]
        .into_iter()
        .flatten()
        .find_map(|pattern| pattern.captures(banner))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
