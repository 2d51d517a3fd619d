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

use crate::config::ProbeConfig;
use crate::error::{HostProbeError, Result};
use crate::models::{Abi, HardwareArchitecture, LibC, OperatingSystem};
use crate::parsers::{parse_libc_path, parse_libc_version};
use crate::platform::account::{self, Account};
use crate::platform::executor::{LocalExecutor, ProbeCommand, SystemExecutor};
use crate::platform::files::{self, LinuxFilesResult};
use crate::platform::identity::{self, PlatformIdentity};
use crate::platform::properties::SystemProperties;
use crate::target::NativeTarget;
use crate::version::SemanticVersion;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// The C library reported by the dynamic linker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibCTrace {
    pub libc: LibC,
    /// Resolved path of the library, e.g. `/lib/x86_64-linux-gnu/libc.so.6`.
    pub path: String,
    pub version: Option<SemanticVersion>,
}

/// Detects the host platform.
///
/// Every probe runs at most once per detector and its result, including
/// "not detected", is kept for the detector's lifetime. Each cache is a
/// separate cell, so a slow probe only blocks callers of that probe.
pub struct Detector {
    properties: SystemProperties,
    config: ProbeConfig,
    executor: Arc<dyn SystemExecutor>,
    operating_system: OnceLock<Option<OperatingSystem>>,
    hardware_architecture: OnceLock<Option<HardwareArchitecture>>,
    mapped_files: OnceLock<Option<LinuxFilesResult>>,
    library_files: OnceLock<Option<LinuxFilesResult>>,
    libc: OnceLock<Option<LibC>>,
    libc_trace: OnceLock<Option<LibCTrace>>,
    abis: Mutex<HashMap<OperatingSystem, Option<Abi>>>,
    identity: OnceLock<PlatformIdentity>,
}

impl Detector {
    pub fn new(
        properties: SystemProperties,
        config: ProbeConfig,
        executor: Arc<dyn SystemExecutor>,
    ) -> Self {
        Self {
            properties,
            config,
            executor,
            operating_system: OnceLock::new(),
            hardware_architecture: OnceLock::new(),
            mapped_files: OnceLock::new(),
            library_files: OnceLock::new(),
            libc: OnceLock::new(),
            libc_trace: OnceLock::new(),
            abis: Mutex::new(HashMap::new()),
            identity: OnceLock::new(),
        }
    }

    /// A detector for this process and machine.
    pub fn local(config: ProbeConfig) -> Self {
        let executor = Arc::new(LocalExecutor::from_config(&config));
        Self::new(SystemProperties::from_environment(), config, executor)
    }

    pub fn properties(&self) -> &SystemProperties {
        &self.properties
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn executor(&self) -> &dyn SystemExecutor {
        self.executor.as_ref()
    }

    pub fn operating_system(&self) -> Option<OperatingSystem> {
        *self.operating_system.get_or_init(|| {
            let raw = &self.properties.os_name;
            log::trace!("Detecting operating system from {raw:?}");
            let os = OperatingSystem::resolve(raw);
            match os {
                Some(os) => log::debug!("Detected operating system {os}"),
                None => log::warn!("Unable to detect operating system from {raw:?}"),
            }
            os
        })
    }

    pub fn hardware_architecture(&self) -> Option<HardwareArchitecture> {
        *self
            .hardware_architecture
            .get_or_init(|| self.detect_hardware_architecture())
    }

    fn detect_hardware_architecture(&self) -> Option<HardwareArchitecture> {
        let raw = self.properties.os_arch.trim().to_lowercase();
        log::trace!(
            "Detecting hardware architecture from arch={raw:?}, abi={:?}, library path={:?}",
            self.properties.abi_type,
            self.properties.library_path
        );

        if let Some(arch) = HardwareArchitecture::resolve(&raw) {
            log::debug!("Detected hardware architecture {arch}");
            return Some(arch);
        }

        if !HardwareArchitecture::is_ambiguous_arm(&raw) {
            log::warn!("Unable to detect hardware architecture from {raw:?}");
            return None;
        }

        log::trace!("Architecture {raw:?} is ambiguous, consulting other signals");
        let arch = self
            .arm_from_abi_type()
            .or_else(|| self.arm_from_library_path())
            .or_else(|| self.library_files().and_then(|result| result.arch))
            .or_else(|| self.mapped_files().and_then(|result| result.arch));

        match arch {
            Some(arch) => {
                log::debug!("Detected hardware architecture {arch}");
                Some(arch)
            }
            None => {
                log::warn!("Unable to tell hard-float from soft-float ARM, reporting unknown");
                Some(HardwareArchitecture::Unknown)
            }
        }
    }

    fn arm_from_abi_type(&self) -> Option<HardwareArchitecture> {
        let abi_type = self.properties.abi_type.as_deref()?.to_lowercase();
        if abi_type.ends_with("eabihf") {
            Some(HardwareArchitecture::Armhf)
        } else if abi_type.ends_with("eabi") {
            Some(HardwareArchitecture::Armel)
        } else {
            None
        }
    }

    fn arm_from_library_path(&self) -> Option<HardwareArchitecture> {
        let path = self.properties.library_path.as_deref()?.to_lowercase();
        if path.contains("armhf") || path.contains("aarch32hf") {
            Some(HardwareArchitecture::Armhf)
        } else if path.contains("armsf") || path.contains("aarch32sf") {
            Some(HardwareArchitecture::Armel)
        } else {
            None
        }
    }

    /// Scan of the process's mapped files. `None` off Linux.
    pub fn mapped_files(&self) -> Option<LinuxFilesResult> {
        *self.mapped_files.get_or_init(|| {
            self.on_linux()
                .then(|| files::scan_mapped_files(&self.config.paths.mapped_files_dir))
        })
    }

    /// Scan of the library directory. `None` off Linux.
    pub fn library_files(&self) -> Option<LinuxFilesResult> {
        *self.library_files.get_or_init(|| {
            self.on_linux()
                .then(|| files::scan_library_dir(&self.config.paths.library_dir))
        })
    }

    fn on_linux(&self) -> bool {
        self.operating_system() == Some(OperatingSystem::Linux)
    }

    /// C library family. Linux only; glibc is assumed when no scan finds
    /// anything else.
    pub fn libc(&self) -> Option<LibC> {
        *self.libc.get_or_init(|| {
            if !self.on_linux() {
                return None;
            }

            let libc = self
                .mapped_files()
                .and_then(|result| result.libc)
                .or_else(|| self.library_files().and_then(|result| result.libc))
                .unwrap_or_else(|| {
                    log::debug!("No C library markers found, assuming glibc");
                    LibC::Glibc
                });
            log::debug!("Detected libc {libc}");
            Some(libc)
        })
    }

    /// The ABI binaries for `os` should target on this host.
    pub fn abi(&self, os: OperatingSystem) -> Option<Abi> {
        if let Some(abi) = self.cached_abis().get(&os) {
            return *abi;
        }

        // Detection reads other probe cells, so it runs without the lock held.
        // A racing caller may detect too; the first value stored wins.
        let abi = self.detect_abi(os);
        *self.cached_abis().entry(os).or_insert_with(|| {
            log::debug!("Detected {os} abi {abi:?}");
            abi
        })
    }

    fn cached_abis(&self) -> MutexGuard<'_, HashMap<OperatingSystem, Option<Abi>>> {
        self.abis.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn detect_abi(&self, os: OperatingSystem) -> Option<Abi> {
        match os {
            OperatingSystem::Linux => match self.libc() {
                Some(LibC::Musl) => Some(Abi::Musl),
                Some(LibC::Glibc) | None => Some(Abi::Gnu),
                Some(LibC::Uclibc) => None,
            },
            OperatingSystem::Windows => {
                let abi_type = self.properties.abi_type.as_deref()?.to_lowercase();
                if abi_type.contains("gnu") {
                    Some(Abi::Gnu)
                } else if abi_type.contains("msvc") {
                    Some(Abi::Msvc)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// C library found by tracing `ldd` on the configured probe binary,
    /// with the version printed by the library itself.
    pub fn libc_trace(&self) -> Option<&LibCTrace> {
        self.libc_trace
            .get_or_init(|| trace_libc(self.executor(), &self.config.ldd_probe_binary))
            .as_ref()
    }

    pub fn require_operating_system(&self) -> Result<OperatingSystem> {
        self.operating_system()
            .ok_or_else(|| HostProbeError::NotDetected("operating system".to_string()))
    }

    pub fn require_hardware_architecture(&self) -> Result<HardwareArchitecture> {
        self.hardware_architecture()
            .ok_or_else(|| HostProbeError::NotDetected("hardware architecture".to_string()))
    }

    pub fn require_libc(&self) -> Result<LibC> {
        self.libc()
            .ok_or_else(|| HostProbeError::NotDetected("C library".to_string()))
    }

    pub fn require_abi(&self, os: OperatingSystem) -> Result<Abi> {
        self.abi(os)
            .ok_or_else(|| HostProbeError::NotDetected(format!("{os} abi")))
    }

    /// Target built from environment-only signals.
    pub fn native_target(&self) -> NativeTarget {
        let os = self.operating_system();
        NativeTarget::new(
            os,
            self.hardware_architecture(),
            os.and_then(|os| self.abi(os)),
        )
    }

    /// Full identity, assembled on first use.
    pub fn identity(&self) -> &PlatformIdentity {
        self.identity.get_or_init(|| identity::assemble(self))
    }

    /// Assembles the identity again, bypassing the cache.
    pub fn detect_identity(&self) -> PlatformIdentity {
        identity::assemble(self)
    }

    pub fn account(&self, username: &str) -> Option<Account> {
        account::lookup(
            self.executor(),
            &self.config.paths.passwd,
            self.operating_system(),
            username,
        )
    }
}

pub(crate) fn trace_libc(executor: &dyn SystemExecutor, probe_binary: &str) -> Option<LibCTrace> {
    let command = ProbeCommand::new("ldd").arg(probe_binary);
    let output = match executor.exec_success(&command) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("Unable to execute '{command}': {e}");
            return None;
        }
    };

    let Some(found) = parse_libc_path(&output) else {
        log::debug!("No C library in '{command}' output");
        return None;
    };
    log::debug!("Found {} at {}", found.libc, found.path);

    // The library prints its own banner when executed. musl's loader exits
    // non-zero after printing usage, so the status is ignored.
    let version = match executor.exec(&ProbeCommand::new(&found.path)) {
        Ok(banner) => parse_libc_version(&banner.output).and_then(|version| {
            SemanticVersion::parse(&version)
                .map_err(|e| log::warn!("Unable to parse libc version {version:?}: {e}"))
                .ok()
        }),
        Err(e) => {
            log::warn!("Unable to execute {} to detect libc version: {e}", found.path);
            None
        }
    };

    Some(LibCTrace {
        libc: found.libc,
        path: found.path,
        version,
    })
}
