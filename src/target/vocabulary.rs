//! Per-project spelling of platform values.
//!
//! Download sites and build systems rarely agree on how to spell a platform.
//! A [`NamingModel`] keeps the overrides for one such consumer and renders
//! templates like `v17.0.1-{os}{_?abi}-{arch}`.

use crate::error::{HostProbeError, Result};
use crate::models::{Abi, HardwareArchitecture, OperatingSystem, Vocabulary};
use crate::target::NativeTarget;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NamingModel {
    os_names: HashMap<OperatingSystem, String>,
    arch_names: HashMap<HardwareArchitecture, String>,
    abi_names: HashMap<Abi, String>,
    values: HashMap<String, String>,
}

impl NamingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_os(mut self, os: OperatingSystem, name: impl Into<String>) -> Self {
        self.os_names.insert(os, name.into());
        self
    }

    pub fn with_arch(mut self, arch: HardwareArchitecture, name: impl Into<String>) -> Self {
        self.arch_names.insert(arch, name.into());
        self
    }

    pub fn with_abi(mut self, abi: Abi, name: impl Into<String>) -> Self {
        self.abi_names.insert(abi, name.into());
        self
    }

    /// Extra placeholder available to templates as `{key}`.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn os_name(&self, os: OperatingSystem) -> &str {
        self.os_names.get(&os).map_or(os.token(), String::as_str)
    }

    pub fn arch_name(&self, arch: HardwareArchitecture) -> &str {
        self.arch_names.get(&arch).map_or(arch.token(), String::as_str)
    }

    pub fn abi_name(&self, abi: Abi) -> &str {
        self.abi_names.get(&abi).map_or(abi.token(), String::as_str)
    }

    /// Renders `template` for `target`.
    ///
    /// `{key}` requires a value. `{prefix?key}` renders `prefix` followed by
    /// the value when there is one and nothing otherwise.
    pub fn format(&self, template: &str, target: &NativeTarget) -> Result<String> {
        let invalid = |message: String| HostProbeError::InvalidTemplate {
            template: template.to_string(),
            message,
        };

        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            output.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unterminated placeholder".to_string()))?;
            let placeholder = &after[..close];

            let (prefix, key, optional) = match placeholder.rsplit_once('?') {
                Some((prefix, key)) => (prefix, key, true),
                None => ("", placeholder, false),
            };

            match self.lookup(key, target) {
                Lookup::Value(value) => {
                    output.push_str(prefix);
                    output.push_str(value);
                }
                Lookup::Absent if optional => {}
                Lookup::Absent => return Err(invalid(format!("no value for {{{key}}}"))),
                Lookup::UnknownKey => return Err(invalid(format!("unknown placeholder {{{key}}}"))),
            }

            rest = &after[close + 1..];
        }
        output.push_str(rest);

        Ok(output)
    }

    fn lookup<'a>(&'a self, key: &str, target: &NativeTarget) -> Lookup<'a> {
        let value = match key {
            "os" => target.operating_system().map(|os| self.os_name(os)),
            "arch" => target.hardware_architecture().map(|arch| self.arch_name(arch)),
            "abi" => target.abi().map(|abi| self.abi_name(abi)),
            _ => match self.values.get(key) {
                Some(value) => Some(value.as_str()),
                None => return Lookup::UnknownKey,
            },
        };
        value.map_or(Lookup::Absent, Lookup::Value)
    }
}

enum Lookup<'a> {
    Value(&'a str),
    Absent,
    UnknownKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_arm64_musl() -> NativeTarget {
        NativeTarget::of(OperatingSystem::Linux, HardwareArchitecture::Arm64).with_abi(Abi::Musl)
    }

    #[test]
    fn test_optional_abi_placeholder() {
        let model = NamingModel::new().with_arch(HardwareArchitecture::Arm64, "aarch64");

        assert_eq!(
            model
                .format("v17.0.1-{os}{_?abi}-{arch}", &linux_arm64_musl())
                .unwrap(),
            "v17.0.1-linux_musl-aarch64"
        );

        let glibc = NativeTarget::of(OperatingSystem::Linux, HardwareArchitecture::Arm64);
        assert_eq!(
            model.format("v17.0.1-{os}{_?abi}-{arch}", &glibc).unwrap(),
            "v17.0.1-linux-aarch64"
        );
    }

    #[test]
    fn test_os_override() {
        let model = NamingModel::new()
            .with_os(OperatingSystem::Windows, "win")
            .with_os(OperatingSystem::MacOS, "mac");
        let target = NativeTarget::of(OperatingSystem::Windows, HardwareArchitecture::X64);

        assert_eq!(model.format("{os}", &target).unwrap(), "win");
        assert_eq!(model.os_name(OperatingSystem::MacOS), "mac");
        assert_eq!(model.os_name(OperatingSystem::Linux), "linux");
    }

    #[test]
    fn test_custom_values() {
        let model = NamingModel::new()
            .with_value("version", "21.0.1")
            .with_value("ext", "tar.gz");
        let target = NativeTarget::of(OperatingSystem::Linux, HardwareArchitecture::X64);

        assert_eq!(
            model
                .format("jdk-{version}_{os}-{arch}_bin.{ext}", &target)
                .unwrap(),
            "jdk-21.0.1_linux-x64_bin.tar.gz"
        );
    }

    #[test]
    fn test_template_errors() {
        let model = NamingModel::new();
        let target = NativeTarget::new(Some(OperatingSystem::Linux), None, None);

        assert!(matches!(
            model.format("{version}", &target),
            Err(HostProbeError::InvalidTemplate { .. })
        ));
        assert!(matches!(
            model.format("{arch}", &target),
            Err(HostProbeError::InvalidTemplate { .. })
        ));
        assert!(matches!(
            model.format("{os", &target),
            Err(HostProbeError::InvalidTemplate { .. })
        ));
        assert_eq!(model.format("plain-{-?arch}", &target).unwrap(), "plain-");
    }
}
