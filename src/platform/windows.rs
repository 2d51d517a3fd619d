//! Windows identity from the registry, for hosts without `uname`.

use crate::error::{HostProbeError, Result};
use crate::parsers::RegistryQuery;
use crate::platform::executor::{ProbeCommand, SystemExecutor};

pub const CURRENT_VERSION_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion";
pub const SYSTEM_ENVIRONMENT_KEY: &str =
    r"HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment";
pub const COMPUTER_NAME_KEY: &str =
    r"HKLM\SYSTEM\CurrentControlSet\Control\ComputerName\ComputerName";

/// First build number shipped as Windows 11.
const WINDOWS_11_BUILD: i64 = 22000;

pub fn query_registry(executor: &dyn SystemExecutor, key: &str) -> Result<RegistryQuery> {
    let command = ProbeCommand::new("reg.exe").arg("query").arg(key);
    let output = executor.exec_success(&command)?;
    Ok(RegistryQuery::parse(&output))
}

/// Release facts assembled from the `CurrentVersion` registry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsRelease {
    /// Marketing name, e.g. `Windows 11 Pro (25H2)`.
    pub product_name: String,
    /// Marketing version, e.g. `11.0.26200`.
    pub os_version: String,
    /// NT kernel version, e.g. `10.0.26200`.
    pub kernel_version: String,
    /// A `uname -a` style line: sysname, computer name, version, product
    /// name and processor architecture.
    pub uname: String,
}

impl WindowsRelease {
    pub fn probe(executor: &dyn SystemExecutor) -> Result<Self> {
        let current_version = query_registry(executor, CURRENT_VERSION_KEY)?;
        let environment = query_registry(executor, SYSTEM_ENVIRONMENT_KEY)?;
        let computer_name = query_registry(executor, COMPUTER_NAME_KEY)?;
        Self::from_registry(&current_version, &environment, &computer_name)
    }

    pub fn from_registry(
        current_version: &RegistryQuery,
        environment: &RegistryQuery,
        computer_name: &RegistryQuery,
    ) -> Result<Self> {
        let number = |name: &str| -> i64 {
            current_version
                .get(name)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(-1)
        };
        // Major/minor numbers only exist from Windows 10 on; older releases
        // report 6.x in CurrentVersion.
        let major = number("CurrentMajorVersionNumber");
        let minor = number("CurrentMinorVersionNumber");
        let build = number("CurrentBuildNumber");
        let legacy_version = current_version.get("CurrentVersion").unwrap_or_default();

        let mut product_name = current_version
            .get("ProductName")
            .ok_or_else(|| HostProbeError::Parse {
                format: "reg query",
                message: "ProductName is missing from CurrentVersion".to_string(),
            })?
            .to_string();

        // Upgraded machines can keep a "Windows 10" product name.
        if build >= WINDOWS_11_BUILD {
            product_name = product_name.replace(" 10 ", " 11 ");
        }
        if let Some(display_version) = current_version.get("DisplayVersion") {
            product_name = format!("{product_name} ({display_version})");
        }

        let kernel_version = if major > 0 {
            format!("{major}.{minor}.{build}")
        } else {
            format!("{legacy_version}.{build}")
        };

        let os_version = if build >= WINDOWS_11_BUILD && major == 10 {
            format!("11.{minor}.{build}")
        } else if major > 0 {
            format!("{major}.{minor}.{build}")
        } else if major < 0 {
            match legacy_version {
                "6.3" => format!("8.1.{build}"),
                "6.2" => format!("8.0.{build}"),
                _ => format!("7.0.{build}"),
            }
        } else {
            legacy_version.to_string()
        };

        let host = computer_name.get("ComputerName").unwrap_or("localhost");
        let machine = environment
            .get("PROCESSOR_ARCHITECTURE")
            .unwrap_or("unknown");
        let uname = format!("Windows {host} {os_version} {product_name} {machine}");
        log::debug!("Synthesized Windows uname: {uname}");

        Ok(Self {
            product_name,
            os_version,
            kernel_version,
            uname,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::executor::{CommandOutput, MockSystemExecutor};
    use mockall::predicate::function;

    const WINDOWS_11_CURRENT_VERSION: &str = r"
HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows NT\CurrentVersion
    CurrentBuildNumber    REG_SZ    26200
    CurrentMajorVersionNumber    REG_DWORD    0xa
    CurrentMinorVersionNumber    REG_DWORD    0x0
    CurrentVersion    REG_SZ    6.3
    DisplayVersion    REG_SZ    25H2
    ProductName    REG_SZ    Windows 10 Pro
";

    const WINDOWS_7_CURRENT_VERSION: &str = r"
HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows NT\CurrentVersion
    CurrentBuildNumber    REG_SZ    7601
    CurrentVersion    REG_SZ    6.1
    ProductName    REG_SZ    Windows 7 Professional
";

    const ENVIRONMENT: &str = r"
HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment
    NUMBER_OF_PROCESSORS    REG_SZ    16
    PROCESSOR_ARCHITECTURE    REG_SZ    AMD64
";

    const COMPUTER_NAME: &str = r"
HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\ComputerName\ComputerName
    ComputerName    REG_SZ    BUILD-WIN11
";

    fn release(current_version: &str) -> Result<WindowsRelease> {
        WindowsRelease::from_registry(
            &RegistryQuery::parse(current_version),
            &RegistryQuery::parse(ENVIRONMENT),
            &RegistryQuery::parse(COMPUTER_NAME),
        )
    }

    #[test]
    fn test_windows_11_relabels_product() {
        let release = release(WINDOWS_11_CURRENT_VERSION).unwrap();

        assert_eq!(release.product_name, "Windows 11 Pro (25H2)");
        assert_eq!(release.os_version, "11.0.26200");
        assert_eq!(release.kernel_version, "10.0.26200");
        assert_eq!(
            release.uname,
            "Windows BUILD-WIN11 11.0.26200 Windows 11 Pro (25H2) AMD64"
        );
    }

    #[test]
    fn test_windows_10_keeps_product() {
        let current_version = WINDOWS_11_CURRENT_VERSION.replace("26200", "19045");
        let release = release(&current_version).unwrap();

        assert_eq!(release.product_name, "Windows 10 Pro (25H2)");
        assert_eq!(release.os_version, "10.0.19045");
        assert_eq!(release.kernel_version, "10.0.19045");
    }

    #[test]
    fn test_legacy_versions() {
        let release7 = release(WINDOWS_7_CURRENT_VERSION).unwrap();
        assert_eq!(release7.product_name, "Windows 7 Professional");
        assert_eq!(release7.os_version, "7.0.7601");
        assert_eq!(release7.kernel_version, "6.1.7601");

        let release81 = release(
            &WINDOWS_7_CURRENT_VERSION
                .replace("6.1", "6.3")
                .replace("7601", "9600"),
        )
        .unwrap();
        assert_eq!(release81.os_version, "8.1.9600");

        let release8 = release(&WINDOWS_7_CURRENT_VERSION.replace("6.1", "6.2")).unwrap();
        assert_eq!(release8.os_version, "8.0.7601");
    }

    #[test]
    fn test_missing_product_name() {
        let result = release("    CurrentBuildNumber    REG_SZ    7601\n");
        assert!(matches!(result, Err(HostProbeError::Parse { format: "reg query", .. })));
    }

    #[test]
    fn test_probe_queries_three_keys() {
        let mut executor = MockSystemExecutor::new();
        for (key, output) in [
            (CURRENT_VERSION_KEY, WINDOWS_11_CURRENT_VERSION),
            (SYSTEM_ENVIRONMENT_KEY, ENVIRONMENT),
            (COMPUTER_NAME_KEY, COMPUTER_NAME),
        ] {
            executor
                .expect_exec()
                .with(function(move |command: &ProbeCommand| {
                    command.program == "reg.exe" && command.args == ["query", key]
                }))
                .times(1)
                .returning(move |_| Ok(CommandOutput::success(output)));
        }

        let release = WindowsRelease::probe(&executor).unwrap();
        assert_eq!(release.product_name, "Windows 11 Pro (25H2)");
    }

    #[test]
    fn test_probe_without_reg_exe() {
        let mut executor = MockSystemExecutor::new();
        executor
            .expect_exec()
            .returning(|command| Err(HostProbeError::CommandNotFound(command.program.clone())));

        assert!(matches!(
            WindowsRelease::probe(&executor),
            Err(HostProbeError::CommandNotFound(_))
        ));
    }
}
