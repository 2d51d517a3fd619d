use hostprobe::target::{NamingModel, NativeTarget};
use hostprobe::{Abi, HardwareArchitecture, HostProbeError, OperatingSystem, SemanticVersion};
use std::collections::HashSet;

fn linux_musl_x64() -> NativeTarget {
    NativeTarget::of(OperatingSystem::Linux, HardwareArchitecture::X64).with_abi(Abi::Musl)
}

#[test]
fn test_detected_artifact_drives_every_derivation() {
    let target = NativeTarget::detect_from_text("jne-1.2.0-x86_64-unknown-linux-musl.tar.gz");
    assert_eq!(target, linux_musl_x64());

    assert_eq!(target.to_string(), "linux-x64-musl");
    assert_eq!(target.rust_triple().unwrap(), "x86_64-unknown-linux-musl");
    assert_eq!(target.autoconf_triple().unwrap(), "x86_64-linux-musl");
    assert_eq!(target.target_token().unwrap(), "linux_musl-x64");
    assert_eq!(target.library_file_name("jne").unwrap(), "libjne.so");
    assert_eq!(target.executable_file_name("jne").unwrap(), "jne");
}

#[test]
fn test_musl_resource_search_order() {
    assert_eq!(
        linux_musl_x64().resolve_resource_paths("/jne", "test").unwrap(),
        vec![
            "/jne/linux_musl/x64/test",
            "/jne/linux_musl/x86_64/test",
            "/jne/linux_musl/amd64/test",
        ]
    );
}

#[test]
fn test_wildcard_target_collapses_to_name() {
    let wildcard = NativeTarget::default();

    assert_eq!(wildcard.to_string(), "*-*");
    assert_eq!(
        wildcard.resolve_resource_paths("/native/", "libjne.so").unwrap(),
        vec!["/native/libjne.so"]
    );
    assert!(matches!(
        wildcard.rust_triple(),
        Err(HostProbeError::MissingOperatingSystem(_))
    ));
}

#[test]
fn test_invalid_abi_rejected_everywhere() {
    let target = NativeTarget::of(OperatingSystem::MacOS, HardwareArchitecture::Arm64)
        .with_abi(Abi::Musl);

    assert!(matches!(
        target.resolve_resource_paths("/jne", "test"),
        Err(HostProbeError::InvalidAbi { .. })
    ));
    assert!(matches!(
        target.target_token(),
        Err(HostProbeError::InvalidAbi { .. })
    ));
    assert!(matches!(
        NativeTarget::from_target_token("macos_musl-arm64"),
        Err(HostProbeError::InvalidAbi { .. })
    ));
}

#[test]
fn test_target_token_parses_back() {
    let target = NativeTarget::from_target_token("windows_gnu-x64").unwrap();

    assert_eq!(target.operating_system(), Some(OperatingSystem::Windows));
    assert_eq!(target.abi(), Some(Abi::Gnu));
    assert_eq!(target.rust_triple().unwrap(), "x86_64-pc-windows-gnu");
    assert_eq!(target.autoconf_triple().unwrap(), "x86_64-w64-mingw32");
    assert_eq!(target.library_file_name("jne").unwrap(), "jne.dll");
}

#[test]
fn test_triples_depend_only_on_fields() {
    let detected = NativeTarget::detect_from_text("zulu21-linux_aarch64.tar.gz");
    let built = NativeTarget::of(OperatingSystem::Linux, HardwareArchitecture::Arm64);

    assert_eq!(detected, built);
    assert_eq!(detected.rust_triple().unwrap(), built.rust_triple().unwrap());
    assert_eq!(detected.autoconf_triple().unwrap(), "aarch64-linux-gnu");
}

#[test]
fn test_naming_model_for_download_names() {
    let model = NamingModel::new()
        .with_os(OperatingSystem::MacOS, "darwin")
        .with_arch(HardwareArchitecture::X64, "amd64")
        .with_value("version", "1.22.1");
    let target = NativeTarget::of(OperatingSystem::MacOS, HardwareArchitecture::X64);

    assert_eq!(
        model.format("go{version}.{os}-{arch}.tar.gz", &target).unwrap(),
        "go1.22.1.darwin-amd64.tar.gz"
    );
    assert_eq!(
        model.format("{os}{_?abi}", &linux_musl_x64()).unwrap(),
        "linux_musl"
    );
}

#[test]
fn test_resolution_from_raw_names() {
    assert_eq!("Mac OS X".parse::<OperatingSystem>().unwrap(), OperatingSystem::MacOS);
    assert_eq!("amd64".parse::<HardwareArchitecture>().unwrap(), HardwareArchitecture::X64);
    assert!(matches!(
        "sparc".parse::<HardwareArchitecture>(),
        Err(HostProbeError::UnrecognizedArchitecture(_))
    ));
}

#[test]
fn test_semantic_version_ordering() {
    let mut versions: Vec<SemanticVersion> = ["5.15.0-88-generic", "6.1.55", "5.15.0", "5.4.0"]
        .iter()
        .map(|text| text.parse().unwrap())
        .collect();
    versions.sort();

    let sources: Vec<&str> = versions.iter().map(|v| v.source()).collect();
    assert_eq!(sources, ["5.4.0", "5.15.0", "5.15.0-88-generic", "6.1.55"]);

    // Same numbers, the flavored release sorts first.
    let plain: SemanticVersion = "14.0".parse().unwrap();
    let release: SemanticVersion = "14.0-RELEASE".parse().unwrap();
    assert!(release < plain);
}

#[test]
fn test_semantic_version_ignores_build_metadata() {
    let a: SemanticVersion = "17.0.5+8".parse().unwrap();
    let b: SemanticVersion = "17.0.5+9".parse().unwrap();

    assert_eq!(a, b);
    let set: HashSet<SemanticVersion> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}
