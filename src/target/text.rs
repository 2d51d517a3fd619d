use crate::models::{Abi, HardwareArchitecture, OperatingSystem, scan};
use crate::target::NativeTarget;

impl NativeTarget {
    /// Best-effort classification of an artifact name, URL or banner.
    ///
    /// Scan order, per vocabulary: canonical tokens and output aliases
    /// first, input-only aliases (`win`, `mac`, `x86`, `armv7l`, ...) only
    /// when nothing else matched. Within a pass the longest matching token
    /// wins, so `android` beats `linux`, `darwin` beats `win`, `x86_64`
    /// beats `x86` and `ppc64le` beats `ppc64`. Sentinels never match.
    pub fn detect_from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.trim().is_empty() {
            return Self::default();
        }

        let target = Self::new(
            scan::<OperatingSystem>(&text),
            scan::<HardwareArchitecture>(&text),
            scan::<Abi>(&text),
        );
        log::trace!("Detected {target} from {text:?}");
        target
    }
}
