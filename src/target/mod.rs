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

//! Target resolution.
//!
//! A [`NativeTarget`] is a possibly partial `{os, arch, abi}` triple. Every
//! derivation (file names, triples, composite tokens, resource search paths)
//! is a pure function of those three fields.

mod naming;
mod resources;
mod text;
mod triple;
pub mod vocabulary;

pub use resources::validate_abi;
pub use vocabulary::NamingModel;

use crate::models::{Abi, HardwareArchitecture, OperatingSystem};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeTarget {
    operating_system: Option<OperatingSystem>,
    hardware_architecture: Option<HardwareArchitecture>,
    abi: Option<Abi>,
}

impl NativeTarget {
    /// Absent fields act as wildcards.
    pub fn new(
        operating_system: Option<OperatingSystem>,
        hardware_architecture: Option<HardwareArchitecture>,
        abi: Option<Abi>,
    ) -> Self {
        Self {
            operating_system,
            hardware_architecture,
            abi,
        }
    }

    pub fn of(operating_system: OperatingSystem, hardware_architecture: HardwareArchitecture) -> Self {
        Self::new(Some(operating_system), Some(hardware_architecture), None)
    }

    pub fn with_abi(self, abi: Abi) -> Self {
        Self {
            abi: Some(abi),
            ..self
        }
    }

    pub fn operating_system(&self) -> Option<OperatingSystem> {
        self.operating_system
    }

    pub fn hardware_architecture(&self) -> Option<HardwareArchitecture> {
        self.hardware_architecture
    }

    pub fn abi(&self) -> Option<Abi> {
        self.abi
    }
}

impl fmt::Display for NativeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |value: Option<String>| value.unwrap_or_else(|| "*".to_string());
        write!(
            f,
            "{}-{}",
            field(self.operating_system.map(|os| os.to_string())),
            field(self.hardware_architecture.map(|arch| arch.to_string()))
        )?;
        if let Some(abi) = self.abi {
            write!(f, "-{abi}")?;
        }
        Ok(())
    }
}
