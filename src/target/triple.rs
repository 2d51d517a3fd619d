use crate::error::{HostProbeError, Result};
use crate::models::{Abi, HardwareArchitecture, OperatingSystem};
use crate::target::NativeTarget;

const RUST: &str = "rust";
const AUTOCONF: &str = "autoconf";

impl NativeTarget {
    pub(super) fn require_arch(&self) -> Result<HardwareArchitecture> {
        self.hardware_architecture
            .ok_or_else(|| HostProbeError::MissingArchitecture(self.to_string()))
    }

    fn unsupported(&self, convention: &str) -> HostProbeError {
        HostProbeError::UnsupportedTarget {
            target: self.to_string(),
            convention: convention.to_string(),
        }
    }

    /// Compiler toolchain triple, e.g. `x86_64-unknown-linux-musl` or
    /// `armv7-unknown-linux-gnueabihf`.
    pub fn rust_triple(&self) -> Result<String> {
        let os = self.require_os()?;
        let arch = self.require_arch()?;

        let arch_part = match arch {
            HardwareArchitecture::X64 => "x86_64",
            HardwareArchitecture::X32 => "i686",
            HardwareArchitecture::Arm64 => "aarch64",
            HardwareArchitecture::Riscv64 => "riscv64gc",
            HardwareArchitecture::Armhf => "armv7",
            HardwareArchitecture::Armel => "arm",
            HardwareArchitecture::Ppc64le => "powerpc64le",
            HardwareArchitecture::Ppc64 => "powerpc64",
            HardwareArchitecture::S390x => "s390x",
            HardwareArchitecture::Mips64le => "mips64el",
            HardwareArchitecture::Any | HardwareArchitecture::Unknown => {
                return Err(self.unsupported(RUST));
            }
        };

        let os_part = match os {
            OperatingSystem::Windows => match self.abi {
                Some(Abi::Gnu) => "pc-windows-gnu".to_string(),
                _ => "pc-windows-msvc".to_string(),
            },
            OperatingSystem::Linux => {
                let libc = match self.abi {
                    Some(Abi::Musl) => "musl",
                    _ => "gnu",
                };
                format!("unknown-linux-{libc}{}", arm32_eabi_suffix(arch))
            }
            OperatingSystem::Android if arch.is_arm32() => "linux-androideabi".to_string(),
            OperatingSystem::Android => "linux-android".to_string(),
            OperatingSystem::MacOS => "apple-darwin".to_string(),
            OperatingSystem::FreeBsd => "unknown-freebsd".to_string(),
            OperatingSystem::OpenBsd => "unknown-openbsd".to_string(),
            OperatingSystem::NetBsd => "unknown-netbsd".to_string(),
            OperatingSystem::DragonFlyBsd => "unknown-dragonfly".to_string(),
            OperatingSystem::Solaris => "sun-solaris".to_string(),
            OperatingSystem::Aix => "ibm-aix".to_string(),
            OperatingSystem::Any | OperatingSystem::Unknown => {
                return Err(self.unsupported(RUST));
            }
        };

        Ok(format!("{arch_part}-{os_part}"))
    }

    /// GNU autoconf build triple, e.g. `x86_64-linux-gnu` or
    /// `x86_64-w64-mingw32`. MSVC has no autoconf spelling.
    pub fn autoconf_triple(&self) -> Result<String> {
        let os = self.require_os()?;
        let arch = self.require_arch()?;

        let arch_part = match arch {
            HardwareArchitecture::X64 => "x86_64",
            HardwareArchitecture::X32 => "i686",
            HardwareArchitecture::Arm64 => "aarch64",
            HardwareArchitecture::Riscv64 => "riscv64",
            HardwareArchitecture::Armhf | HardwareArchitecture::Armel => "arm",
            HardwareArchitecture::Ppc64le => "powerpc64le",
            HardwareArchitecture::Ppc64 => "powerpc64",
            HardwareArchitecture::S390x => "s390x",
            HardwareArchitecture::Mips64le => "mips64el",
            HardwareArchitecture::Any | HardwareArchitecture::Unknown => {
                return Err(self.unsupported(AUTOCONF));
            }
        };

        let os_part = match os {
            OperatingSystem::Windows => match self.abi {
                Some(Abi::Gnu) => "w64-mingw32".to_string(),
                _ => return Err(self.unsupported(AUTOCONF)),
            },
            OperatingSystem::Linux => {
                let libc = match self.abi {
                    Some(Abi::Musl) => "musl",
                    _ => "gnu",
                };
                format!("linux-{libc}{}", arm32_eabi_suffix(arch))
            }
            OperatingSystem::MacOS => "apple-darwin".to_string(),
            OperatingSystem::FreeBsd => "unknown-freebsd".to_string(),
            OperatingSystem::OpenBsd => "unknown-openbsd".to_string(),
            OperatingSystem::NetBsd => "unknown-netbsd".to_string(),
            OperatingSystem::DragonFlyBsd => "unknown-dragonfly".to_string(),
            OperatingSystem::Solaris => "sun-solaris".to_string(),
            _ => return Err(self.unsupported(AUTOCONF)),
        };

        Ok(format!("{arch_part}-{os_part}"))
    }
}

fn arm32_eabi_suffix(arch: HardwareArchitecture) -> &'static str {
    match arch {
        HardwareArchitecture::Armhf => "eabihf",
        HardwareArchitecture::Armel => "eabi",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(
        os: OperatingSystem,
        arch: HardwareArchitecture,
        abi: Option<Abi>,
    ) -> NativeTarget {
        NativeTarget::new(Some(os), Some(arch), abi)
    }

    #[test]
    fn test_rust_triple() {
        use HardwareArchitecture::*;
        use OperatingSystem::*;

        let cases = [
            (target(Linux, X64, None), "x86_64-unknown-linux-gnu"),
            (target(Linux, X64, Some(Abi::Gnu)), "x86_64-unknown-linux-gnu"),
            (target(Linux, X64, Some(Abi::Musl)), "x86_64-unknown-linux-musl"),
            (target(Linux, Armhf, None), "armv7-unknown-linux-gnueabihf"),
            (target(Linux, Armel, None), "arm-unknown-linux-gnueabi"),
            (target(Linux, Armhf, Some(Abi::Musl)), "armv7-unknown-linux-musleabihf"),
            (target(Linux, Riscv64, None), "riscv64gc-unknown-linux-gnu"),
            (target(Windows, X64, None), "x86_64-pc-windows-msvc"),
            (target(Windows, X64, Some(Abi::Gnu)), "x86_64-pc-windows-gnu"),
            (target(Windows, X32, Some(Abi::Msvc)), "i686-pc-windows-msvc"),
            (target(MacOS, Arm64, None), "aarch64-apple-darwin"),
            (target(FreeBsd, X64, None), "x86_64-unknown-freebsd"),
            (target(DragonFlyBsd, X64, None), "x86_64-unknown-dragonfly"),
            (target(Solaris, X64, None), "x86_64-sun-solaris"),
            (target(Android, Arm64, None), "aarch64-linux-android"),
            (target(Android, Armhf, None), "armv7-linux-androideabi"),
        ];
        for (target, expected) in cases {
            assert_eq!(target.rust_triple().unwrap(), expected);
        }
    }

    #[test]
    fn test_autoconf_triple() {
        use HardwareArchitecture::*;
        use OperatingSystem::*;

        let cases = [
            (target(Linux, X64, None), "x86_64-linux-gnu"),
            (target(Linux, X64, Some(Abi::Musl)), "x86_64-linux-musl"),
            (target(Linux, Arm64, None), "aarch64-linux-gnu"),
            (target(Linux, Armhf, None), "arm-linux-gnueabihf"),
            (target(Linux, Armel, None), "arm-linux-gnueabi"),
            (target(Linux, Riscv64, None), "riscv64-linux-gnu"),
            (target(Windows, X64, Some(Abi::Gnu)), "x86_64-w64-mingw32"),
            (target(MacOS, X64, None), "x86_64-apple-darwin"),
            (target(OpenBsd, X64, None), "x86_64-unknown-openbsd"),
        ];
        for (target, expected) in cases {
            assert_eq!(target.autoconf_triple().unwrap(), expected);
        }
    }

    #[test]
    fn test_triples_are_deterministic() {
        let a = target(
            OperatingSystem::Linux,
            HardwareArchitecture::Ppc64le,
            Some(Abi::Gnu),
        );
        let b = a;
        assert_eq!(a.autoconf_triple().unwrap(), b.autoconf_triple().unwrap());
        assert_eq!(a.rust_triple().unwrap(), b.rust_triple().unwrap());
    }

    #[test]
    fn test_autoconf_rejects_msvc() {
        for abi in [None, Some(Abi::Msvc)] {
            let result = target(OperatingSystem::Windows, HardwareArchitecture::X64, abi)
                .autoconf_triple();
            assert!(matches!(
                result,
                Err(HostProbeError::UnsupportedTarget { ref convention, .. }) if convention == "autoconf"
            ));
        }
    }

    #[test]
    fn test_missing_fields() {
        let no_os = NativeTarget::new(None, Some(HardwareArchitecture::X64), None);
        let no_arch = NativeTarget::new(Some(OperatingSystem::Linux), None, None);

        assert!(matches!(
            no_os.rust_triple(),
            Err(HostProbeError::MissingOperatingSystem(_))
        ));
        assert!(matches!(
            no_arch.autoconf_triple(),
            Err(HostProbeError::MissingArchitecture(_))
        ));
    }

    #[test]
    fn test_sentinels_unsupported() {
        assert!(
            target(OperatingSystem::Any, HardwareArchitecture::X64, None)
                .rust_triple()
                .is_err()
        );
        assert!(
            target(OperatingSystem::Linux, HardwareArchitecture::Unknown, None)
                .autoconf_triple()
                .is_err()
        );
        assert!(
            target(OperatingSystem::Aix, HardwareArchitecture::Ppc64, None)
                .autoconf_triple()
                .is_err()
        );
    }
}
