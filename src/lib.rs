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

//! Host platform identification.
//!
//! - [`models`]: canonical operating system, architecture, ABI and C library
//!   values, resolved from the many spellings tools use for them.
//! - [`target`]: derivations from an `{os, arch, abi}` target such as file
//!   names, toolchain triples and resource search paths.
//! - [`parsers`]: readers for `uname`, `os-release`, `sw_vers`, `reg query`,
//!   passwd, `dscl` and `ldd` output.
//! - [`platform`]: the memoizing [`Detector`](platform::Detector).

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod platform;
pub mod target;
pub mod version;

pub use error::{HostProbeError, Result};
pub use models::{Abi, HardwareArchitecture, LibC, OperatingSystem};
pub use platform::{Detector, PlatformIdentity};
pub use target::NativeTarget;
pub use version::SemanticVersion;
