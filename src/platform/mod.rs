//! Host platform detection.
//!
//! [`Detector`] combines environment signals ([`SystemProperties`]), file
//! system scans and external commands run through a [`SystemExecutor`] into
//! an operating system, architecture, ABI and C library, and on request a
//! full [`PlatformIdentity`]. Probes that cannot run are logged and skipped.

pub mod account;
pub mod detector;
pub mod executor;
pub mod files;
pub mod identity;
pub mod properties;
pub mod windows;

pub use account::Account;
pub use detector::{Detector, LibCTrace};
pub use executor::{CommandOutput, LocalExecutor, ProbeCommand, SystemExecutor};
pub use files::LinuxFilesResult;
pub use identity::PlatformIdentity;
pub use properties::SystemProperties;
pub use windows::WindowsRelease;
