use crate::error::{HostProbeError, Result};
use crate::models::{Abi, HardwareArchitecture, OperatingSystem, Vocabulary};
use crate::target::NativeTarget;

/// Rejects an ABI that does not belong to the operating system. No ABI, or
/// no operating system, always passes.
pub fn validate_abi(os: Option<OperatingSystem>, abi: Option<Abi>) -> Result<()> {
    match (os, abi) {
        (Some(os), Some(abi)) if !abi.is_valid_for(os) => Err(HostProbeError::InvalidAbi {
            abi: abi.to_string(),
            os: os.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Combines an OS spelling with the ABI when the ABI is not the platform
/// default: `linux_musl`, `windows_gnu`.
fn compose_os_abi(os_spelling: &str, os: OperatingSystem, abi: Option<Abi>) -> String {
    match (os, abi) {
        (OperatingSystem::Linux, Some(abi @ Abi::Musl))
        | (OperatingSystem::Windows, Some(abi @ Abi::Gnu)) => format!("{os_spelling}_{abi}"),
        _ => os_spelling.to_string(),
    }
}

impl NativeTarget {
    /// Single token combining OS and ABI, e.g. `linux`, `linux_musl`,
    /// `windows_gnu`.
    pub fn os_abi_token(&self) -> Result<String> {
        let os = self.require_os()?;
        validate_abi(Some(os), self.abi)?;
        Ok(compose_os_abi(os.token(), os, self.abi))
    }

    pub fn arch_token(&self) -> Result<String> {
        Ok(self.require_arch()?.token().to_string())
    }

    /// `{os_abi}-{arch}`, e.g. `linux_musl-x64`.
    pub fn target_token(&self) -> Result<String> {
        Ok(format!("{}-{}", self.os_abi_token()?, self.arch_token()?))
    }

    /// Parses a token produced by [`NativeTarget::target_token`].
    pub fn from_target_token(token: &str) -> Result<Self> {
        let invalid = || HostProbeError::InvalidTarget(token.to_string());

        let (os_abi, arch) = token.trim().rsplit_once('-').ok_or_else(invalid)?;
        let arch = HardwareArchitecture::resolve(arch).ok_or_else(invalid)?;

        let (os, abi) = match os_abi.split_once('_') {
            Some((os, abi)) => (os, Some(Abi::resolve(abi).ok_or_else(invalid)?)),
            None => (os_abi, None),
        };
        let os = OperatingSystem::resolve(os).ok_or_else(invalid)?;
        validate_abi(Some(os), abi)?;

        Ok(Self::new(Some(os), Some(arch), abi))
    }

    /// Candidate resource paths, most specific first.
    ///
    /// Walks every OS spelling (canonical first) crossed with every
    /// architecture spelling (canonical first). A missing architecture
    /// drops that level; a missing OS walks the architecture spellings alone
    /// and finishes with `prefix/name`.
    pub fn resolve_resource_paths(&self, prefix: &str, name: &str) -> Result<Vec<String>> {
        validate_abi(self.operating_system, self.abi)?;

        let prefix = prefix.trim_end_matches('/');
        let arch_aliases = self
            .hardware_architecture
            .map(|arch| arch.aliases())
            .unwrap_or_default();

        let mut paths = Vec::new();
        match self.operating_system {
            Some(os) => {
                for os_alias in os.aliases() {
                    let os_dir = compose_os_abi(os_alias, os, self.abi);
                    if arch_aliases.is_empty() {
                        paths.push(format!("{prefix}/{os_dir}/{name}"));
                    }
                    for arch_alias in &arch_aliases {
                        paths.push(format!("{prefix}/{os_dir}/{arch_alias}/{name}"));
                    }
                }
            }
            None => {
                for arch_alias in &arch_aliases {
                    paths.push(format!("{prefix}/{arch_alias}/{name}"));
                }
                paths.push(format!("{prefix}/{name}"));
            }
        }

        log::trace!("Resource paths for {self}: {paths:?}");
        Ok(paths)
    }
}
