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

//! Full platform identity assembled from every available probe.

use crate::error::Result;
use crate::models::{Abi, HardwareArchitecture, LibC, OperatingSystem};
use crate::parsers::{OsRelease, SwVers, Uname, mac_release_name};
use crate::platform::detector::Detector;
use crate::platform::executor::{ProbeCommand, SystemExecutor};
use crate::platform::windows::WindowsRelease;
use crate::target::NativeTarget;
use crate::version::SemanticVersion;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Instant;

/// What the host is, as far as the probes could tell.
///
/// Every field is optional. Probes that cannot run leave their fields empty
/// instead of failing the whole assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformIdentity {
    pub operating_system: Option<OperatingSystem>,
    pub hardware_architecture: Option<HardwareArchitecture>,
    pub abi: Option<Abi>,
    pub libc: Option<LibC>,
    pub libc_version: Option<SemanticVersion>,
    /// Short product name, e.g. `Ubuntu` or `macOS`.
    pub name: Option<String>,
    /// Name and version, e.g. `Ubuntu 22.04.3 LTS (Jammy Jellyfish)`.
    pub display_name: Option<String>,
    /// Descriptive name as the vendor spells it.
    pub pretty_name: Option<String>,
    /// Product version of the distribution or OS release.
    pub version: Option<SemanticVersion>,
    /// Kernel release, kept apart from `version` wherever the two differ.
    pub kernel_version: Option<SemanticVersion>,
    pub uname: Option<Uname>,
}

impl PlatformIdentity {
    pub fn native_target(&self) -> NativeTarget {
        NativeTarget::new(self.operating_system, self.hardware_architecture, self.abi)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name.as_deref().or(self.name.as_deref()) {
            Some(name) => write!(f, "{name} ({})", self.native_target()),
            None => write!(f, "{}", self.native_target()),
        }
    }
}

pub(crate) fn assemble(detector: &Detector) -> PlatformIdentity {
    let started = Instant::now();
    let executor = detector.executor();
    let config = detector.config();
    let mut identity = PlatformIdentity::default();

    let mut uname = probe_uname(executor);
    let mut windows = None;

    // Cygwin and MSYS answer `uname` too, but the registry knows more.
    if uname.as_ref().is_none_or(is_windows_compat_layer) {
        log::debug!("Trying the Windows registry to detect the platform");
        match WindowsRelease::probe(executor) {
            Ok(release) => match Uname::parse(&release.uname) {
                Ok(parsed) => {
                    uname = Some(parsed);
                    windows = Some(release);
                }
                Err(e) => log::warn!("Unable to parse synthesized Windows uname: {e}"),
            },
            Err(e) => log::debug!("Unable to query the Windows registry: {e}"),
        }
    }

    if let Some(uname) = &uname {
        apply_uname(&mut identity, uname);
    }

    if let Some(release) = windows {
        identity.kernel_version = parse_version("Windows kernel version", &release.kernel_version);
        identity.name = Some("Windows".to_string());
        identity.display_name = Some(release.product_name.clone());
        identity.pretty_name = Some(release.product_name);
    }

    // Environment-only signals fill whatever the probes could not.
    if identity.operating_system.is_none() {
        identity.operating_system = detector.operating_system();
    }
    if identity.hardware_architecture.is_none() {
        identity.hardware_architecture = detector.hardware_architecture();
    }

    let os = identity.operating_system;

    let os_release = match os {
        Some(OperatingSystem::Windows | OperatingSystem::MacOS) => None,
        _ => read_os_release(executor, &config.paths.os_release, os),
    };

    // The uname release of these kernels is not the product version.
    let kernel_based = matches!(os, Some(OperatingSystem::Linux | OperatingSystem::MacOS));
    if (kernel_based || os_release.is_some()) && identity.kernel_version.is_none() {
        identity.kernel_version = identity.version.take();
    }

    if let Some(release) = &os_release {
        apply_os_release(&mut identity, release);
    }

    if os == Some(OperatingSystem::MacOS) {
        match executor.exec_success(&ProbeCommand::new("sw_vers")) {
            Ok(output) => apply_sw_vers(&mut identity, &SwVers::parse(&output)),
            Err(e) => log::warn!("Unable to execute 'sw_vers' to detect the macOS release: {e}"),
        }
    }

    if os == Some(OperatingSystem::Linux) {
        match detector.libc_trace() {
            Some(trace) => {
                identity.libc = Some(trace.libc);
                identity.libc_version = trace.version.clone();
            }
            None if detector.operating_system() == Some(OperatingSystem::Linux) => {
                identity.libc = detector.libc();
            }
            None => {}
        }
    }

    identity.abi = match (identity.libc, os) {
        (Some(libc), _) => libc.abi(),
        (None, Some(os)) => detector.abi(os),
        (None, None) => None,
    };
    identity.uname = uname;

    log::debug!(
        "Assembled platform identity in {} ms: {identity}",
        started.elapsed().as_millis()
    );
    identity
}

fn probe_uname(executor: &dyn SystemExecutor) -> Option<Uname> {
    log::debug!("Trying 'uname -a' to detect the platform");
    let output = match executor.exec_success(&ProbeCommand::new("uname").arg("-a")) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("Unable to execute 'uname -a': {e}");
            return None;
        }
    };

    Uname::parse(output.trim())
        .map_err(|e| log::warn!("Unable to parse 'uname -a' output: {e}"))
        .ok()
}

fn is_windows_compat_layer(uname: &Uname) -> bool {
    let source = uname.source.to_lowercase();
    source.contains("cygwin") || source.contains("msys")
}

fn apply_uname(identity: &mut PlatformIdentity, uname: &Uname) {
    // The platform fields are tried first, the whole line only for what
    // they leave open.
    let fields = NativeTarget::detect_from_text(&uname.platform_text());
    let whole = || NativeTarget::detect_from_text(&uname.source);

    identity.operating_system = fields
        .operating_system()
        .or_else(|| whole().operating_system());
    identity.hardware_architecture = fields
        .hardware_architecture()
        .or_else(|| whole().hardware_architecture());

    identity.version = parse_version("uname release", &uname.version);
    identity.name = Some(uname.sysname.clone());
    identity.display_name = identity
        .version
        .as_ref()
        .map(|version| format!("{} {}", uname.sysname, version.source()));
    identity.pretty_name = identity.display_name.clone();
}

fn read_os_release(
    executor: &dyn SystemExecutor,
    path: &Path,
    os: Option<OperatingSystem>,
) -> Option<OsRelease> {
    let expected = matches!(os, Some(OperatingSystem::Linux | OperatingSystem::FreeBsd));
    match executor.read_file(path) {
        Ok(content) => {
            let release = OsRelease::parse(&content);
            if release.is_empty() {
                log::debug!("{path:?} has no entries");
                return None;
            }
            Some(release)
        }
        Err(e) if expected => {
            log::debug!("Unable to read {path:?}: {e}");
            None
        }
        Err(e) => {
            log::trace!("No {path:?} on {os:?}: {e}");
            None
        }
    }
}

fn apply_os_release(identity: &mut PlatformIdentity, release: &OsRelease) {
    if let Some(name) = release.name() {
        identity.name = Some(name.to_string());
    }
    let name = identity.name.clone().unwrap_or_default();

    identity.display_name = Some(match (release.version(), release.pretty_name(), release.version_id()) {
        (Some(version), _, _) => format!("{name} {version}"),
        (None, Some(pretty_name), _) => pretty_name.to_string(),
        (None, None, Some(version_id)) => format!("{name} {version_id}"),
        (None, None, None) => name,
    });
    if let Some(pretty_name) = release.pretty_name() {
        identity.pretty_name = Some(pretty_name.to_string());
    }
    identity.version = release
        .version_id()
        .and_then(|version_id| parse_version("VERSION_ID", version_id));
}

fn apply_sw_vers(identity: &mut PlatformIdentity, sw_vers: &SwVers) {
    let Some(product) = sw_vers.product_name() else {
        log::warn!("'sw_vers' did not report a product name");
        return;
    };
    identity.name = Some(product.to_string());

    let Some(product_version) = sw_vers.product_version() else {
        identity.display_name = Some(product.to_string());
        return;
    };
    let mut display_name = format!("{product} {product_version}");

    identity.version = parse_version("sw_vers ProductVersion", product_version);
    if let Some(codename) = identity
        .version
        .as_ref()
        .and_then(|version| mac_release_name(version.major(), version.minor()))
    {
        display_name = format!("{display_name} ({codename})");
    }

    identity.pretty_name = Some(match sw_vers.build_version() {
        Some(build) => format!("{display_name} build {build}"),
        None => display_name.clone(),
    });
    identity.display_name = Some(display_name);
}

fn parse_version(what: &str, text: &str) -> Option<SemanticVersion> {
    SemanticVersion::parse(text)
        .map_err(|e| log::warn!("Unable to parse {what} {text:?}: {e}"))
        .ok()
}
