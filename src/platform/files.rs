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

//! Filesystem scans that reveal the C library and the 32-bit ARM flavour on
//! Linux.

use crate::models::{HardwareArchitecture, LibC};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a directory scan found. Either field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinuxFilesResult {
    pub libc: Option<LibC>,
    pub arch: Option<HardwareArchitecture>,
}

/// Scans file names in a library directory such as `/lib`.
///
/// Only musl is recognised here: every glibc system also carries files
/// named `libc*`, so their presence says nothing.
pub fn scan_library_dir(dir: &Path) -> LinuxFilesResult {
    let started = Instant::now();
    let mut result = LinuxFilesResult::default();

    for name in list_dir(dir) {
        let name = name.to_string_lossy().to_lowercase();
        log::trace!("Analyzing library {name}");
        if name.contains("musl") {
            result.libc = Some(LibC::Musl);
        }
        if let Some(arch) = arm_flavour(&name) {
            result.arch = Some(arch);
        }
    }

    log::debug!(
        "Scanned {dir:?} in {} ms: {result:?}",
        started.elapsed().as_millis()
    );
    result
}

/// Scans the files mapped into this process, e.g. `/proc/self/map_files`.
///
/// Each entry is a link to a mapped file. A musl loader anywhere in the
/// map wins over a `libc` match, since musl's loader is itself named
/// `ld-musl-*` and glibc is only inferred from `/libc`.
pub fn scan_mapped_files(dir: &Path) -> LinuxFilesResult {
    let started = Instant::now();
    let mut result = LinuxFilesResult::default();
    let mut possibly_glibc = false;

    for entry in list_dir(dir) {
        let Some(target) = resolve_link(&dir.join(&entry)) else {
            continue;
        };
        let target = target.to_string_lossy().to_lowercase();
        log::trace!("Analyzing mapped file {target}");

        if target.contains("musl") {
            result.libc = Some(LibC::Musl);
        } else if target.contains("/libc") {
            possibly_glibc = true;
        }
        if let Some(arch) = arm_flavour(&target) {
            result.arch = Some(arch);
        }
    }

    if result.libc.is_none() && possibly_glibc {
        result.libc = Some(LibC::Glibc);
    }

    log::debug!(
        "Scanned {dir:?} in {} ms: {result:?}",
        started.elapsed().as_millis()
    );
    result
}

/// Hard-float markers are checked first; `arm-linux-gnueabi` is a prefix of
/// `arm-linux-gnueabihf`.
fn arm_flavour(name: &str) -> Option<HardwareArchitecture> {
    if name.contains("armhf") || name.contains("arm-linux-gnueabihf") {
        Some(HardwareArchitecture::Armhf)
    } else if name.contains("armel") || name.contains("arm-linux-gnueabi") {
        Some(HardwareArchitecture::Armel)
    } else {
        None
    }
}

fn list_dir(dir: &Path) -> Vec<std::ffi::OsString> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name())
            .collect(),
        Err(e) => {
            log::debug!("Unable to list {dir:?}: {e}");
            Vec::new()
        }
    }
}

fn resolve_link(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path)
        .or_else(|_| fs::read_link(path))
        .map_err(|e| log::trace!("Unable to resolve {path:?}: {e}"))
        .ok()
}
