use crate::error::{HostProbeError, Result};
use crate::models::OperatingSystem;
use crate::target::NativeTarget;

impl NativeTarget {
    pub(super) fn require_os(&self) -> Result<OperatingSystem> {
        self.operating_system
            .ok_or_else(|| HostProbeError::MissingOperatingSystem(self.to_string()))
    }

    /// `.exe` on Windows, nothing elsewhere.
    pub fn executable_file_extension(&self) -> Result<Option<&'static str>> {
        Ok(match self.require_os()? {
            OperatingSystem::Windows => Some(".exe"),
            _ => None,
        })
    }

    pub fn library_file_extension(&self) -> Result<Option<&'static str>> {
        let os = self.require_os()?;
        Ok(match os {
            OperatingSystem::Windows => Some(".dll"),
            OperatingSystem::MacOS => Some(".dylib"),
            _ if os.uses_shared_objects() => Some(".so"),
            _ => None,
        })
    }

    pub fn executable_file_name(&self, name: &str) -> Result<String> {
        Ok(match self.executable_file_extension()? {
            Some(extension) => format!("{name}{extension}"),
            None => name.to_string(),
        })
    }

    /// `name.dll` on Windows, `lib<name>.dylib` on macOS and `lib<name>.so`
    /// on the other Unix-like systems. Wildcard systems keep the name as is.
    pub fn library_file_name(&self, name: &str) -> Result<String> {
        let os = self.require_os()?;
        Ok(match (os, self.library_file_extension()?) {
            (OperatingSystem::Windows, Some(extension)) => format!("{name}{extension}"),
            (_, Some(extension)) => format!("lib{name}{extension}"),
            (_, None) => name.to_string(),
        })
    }
}
