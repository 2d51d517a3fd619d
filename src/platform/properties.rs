use std::env;

const LIBRARY_PATH_ENV_VAR: &str = "LD_LIBRARY_PATH";

/// Environment-only signals describing the running process.
///
/// `from_environment` reads them from the compiled target and the process
/// environment. Tests build them by hand to replay other hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemProperties {
    /// Raw operating system name, e.g. `linux` or `Mac OS X`.
    pub os_name: String,
    /// Raw architecture name, e.g. `x86_64`, `amd64` or `arm`.
    pub os_arch: String,
    /// ABI hint such as `gnueabihf`, `musl` or `msvc`.
    pub abi_type: Option<String>,
    /// Search path for shared libraries.
    pub library_path: Option<String>,
}

impl SystemProperties {
    pub fn new(os_name: impl Into<String>, os_arch: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            os_arch: os_arch.into(),
            abi_type: None,
            library_path: None,
        }
    }

    pub fn with_abi_type(mut self, abi_type: impl Into<String>) -> Self {
        self.abi_type = Some(abi_type.into());
        self
    }

    pub fn with_library_path(mut self, library_path: impl Into<String>) -> Self {
        self.library_path = Some(library_path.into());
        self
    }

    pub fn from_environment() -> Self {
        let properties = Self {
            os_name: env::consts::OS.to_string(),
            os_arch: compiled_arch().to_string(),
            abi_type: compiled_abi_type(),
            library_path: env::var(LIBRARY_PATH_ENV_VAR).ok().filter(|p| !p.is_empty()),
        };
        log::trace!("System properties: {properties:?}");
        properties
    }
}

/// `std::env::consts::ARCH` does not carry endianness, so the variants the
/// vocabulary distinguishes by byte order are spelled out here.
fn compiled_arch() -> &'static str {
    match env::consts::ARCH {
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips64" if cfg!(target_endian = "little") => "mips64el",
        arch => arch,
    }
}

fn compiled_abi_type() -> Option<String> {
    let target_env = if cfg!(target_env = "gnu") {
        "gnu"
    } else if cfg!(target_env = "musl") {
        "musl"
    } else if cfg!(target_env = "msvc") {
        "msvc"
    } else {
        ""
    };
    let float_abi = if cfg!(target_abi = "eabihf") {
        "eabihf"
    } else if cfg!(target_abi = "eabi") {
        "eabi"
    } else {
        ""
    };

    let abi_type = format!("{target_env}{float_abi}");
    (!abi_type.is_empty()).then_some(abi_type)
}
