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

//! Canonical platform vocabularies.
//!
//! Every value has one canonical token, zero or more output aliases (emitted
//! as fallback spellings) and zero or more input-only aliases (accepted when
//! resolving, never emitted). Resolution never fails: an unknown string is
//! `None`.

pub mod abi;
pub mod arch;
pub mod libc;
pub mod os;

pub use abi::Abi;
pub use arch::HardwareArchitecture;
pub use libc::LibC;
pub use os::OperatingSystem;

/// Token tables shared by the canonical enums.
pub trait Vocabulary: Copy + Eq + 'static {
    /// Every value in declaration order.
    const ALL: &'static [Self];

    fn token(self) -> &'static str;

    fn output_aliases(self) -> &'static [&'static str] {
        &[]
    }

    fn input_aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Sentinels resolve only by exact token.
    fn is_sentinel(self) -> bool {
        false
    }

    /// Canonical token followed by every output alias.
    fn aliases(self) -> Vec<&'static str> {
        let mut aliases = vec![self.token()];
        aliases.extend_from_slice(self.output_aliases());
        aliases
    }
}

/// Resolves a raw platform string to a canonical value.
///
/// Exact matches on any token win. Otherwise the input is searched for
/// tokens as substrings, longest token first, with declaration order
/// breaking ties.
pub fn resolve<V: Vocabulary>(raw: &str) -> Option<V> {
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = V::ALL.iter().copied().find(|value| {
        value.token() == needle
            || value.output_aliases().contains(&needle.as_str())
            || value.input_aliases().contains(&needle.as_str())
    });
    if exact.is_some() {
        return exact;
    }

    let mut best: Option<(V, usize)> = None;
    for value in V::ALL.iter().copied().filter(|v| !v.is_sentinel()) {
        let tokens = std::iter::once(value.token())
            .chain(value.output_aliases().iter().copied())
            .chain(value.input_aliases().iter().copied());
        for token in tokens {
            if needle.contains(token) && best.is_none_or(|(_, len)| token.len() > len) {
                best = Some((value, token.len()));
            }
        }
    }
    best.map(|(value, _)| value)
}

/// Finds the value whose token appears in `text`, as used by free-text
/// classification. Canonical tokens and output aliases are tried first;
/// input-only aliases only when nothing else matched. `text` must already
/// be lowercase.
pub(crate) fn scan<V: Vocabulary>(text: &str) -> Option<V> {
    scan_tokens(text, |value: V| value.aliases())
        .or_else(|| scan_tokens(text, |value: V| value.input_aliases().to_vec()))
}

fn scan_tokens<V: Vocabulary>(text: &str, tokens: impl Fn(V) -> Vec<&'static str>) -> Option<V> {
    let mut best: Option<(V, usize)> = None;
    for value in V::ALL.iter().copied().filter(|v| !v.is_sentinel()) {
        for token in tokens(value) {
            if text.contains(token) && best.is_none_or(|(_, len)| token.len() > len) {
                best = Some((value, token.len()));
            }
        }
    }
    best.map(|(value, _)| value)
}
