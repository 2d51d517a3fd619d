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

//! Parsers for the text produced by host tools and system files.
//!
//! Every parser takes the captured text rather than running anything, so the
//! probes in [`crate::platform`] decide how the text is obtained. Structural
//! problems (too few `uname` fields) are errors; missing keys and malformed
//! lines in line-oriented formats are not.

pub mod dscl;
pub mod ldd;
pub mod os_release;
pub mod passwd;
pub mod registry;
pub mod sw_vers;
pub mod uname;

pub use dscl::Dscl;
pub use ldd::{LibCPath, detect_libc_family, parse_libc_path, parse_libc_version};
pub use os_release::OsRelease;
pub use passwd::{Passwd, PasswdEntry};
pub use registry::{RegistryQuery, RegistryValue};
pub use sw_vers::{SwVers, mac_release_name};
pub use uname::Uname;
