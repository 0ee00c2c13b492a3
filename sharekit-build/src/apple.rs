//! Apple platform build utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Configuration for Swift compilation.
#[derive(Debug, Clone)]
pub struct AppleSwiftConfig {
    /// The crate/module name (e.g., "sharekit-share").
    pub pkg_name: String,
    /// Swift source files to compile, relative to the crate manifest.
    pub swift_sources: Vec<PathBuf>,
    /// Output library name (e.g., "ShareHelper").
    pub lib_name: String,
    /// Frameworks to link.
    pub frameworks: Vec<String>,
}

impl AppleSwiftConfig {
    /// Create a new config with required fields.
    #[must_use]
    pub fn new(pkg_name: impl Into<String>, lib_name: impl Into<String>) -> Self {
        Self {
            pkg_name: pkg_name.into(),
            swift_sources: Vec::new(),
            lib_name: lib_name.into(),
            frameworks: vec!["Foundation".to_string()],
        }
    }

    /// Add a Swift source file.
    #[must_use]
    pub fn swift_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.swift_sources.push(path.into());
        self
    }

    /// Add a framework to link.
    #[must_use]
    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.frameworks.push(name.into());
        self
    }
}

/// Compile Swift code and link it into the crate.
///
/// Generates the swift-bridge glue for `bridge_rs`, concatenates it with the
/// configured sources, compiles them into a static library and emits the link
/// directives. Does nothing unless the target is iOS or macOS.
///
/// # Panics
/// Panics if the Apple toolchain (`xcrun`, `swiftc`, `ar`) is missing or fails.
pub fn compile_swift(bridge_rs: &str, config: &AppleSwiftConfig) {
    let target_os = crate::target_os();
    if target_os != "ios" && target_os != "macos" {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    println!("cargo:rerun-if-changed={bridge_rs}");
    for source in &config.swift_sources {
        println!("cargo:rerun-if-changed={}", manifest_dir.join(source).display());
    }

    swift_bridge_build::parse_bridges(vec![bridge_rs])
        .write_all_concatenated(out_dir.clone(), &config.pkg_name);

    let bridging_header = write_bridging_header(&out_dir, &config.pkg_name);
    let combined = write_combined_source(&out_dir, &manifest_dir, config);

    let is_ios = target_os == "ios";
    let sdk_path = xcrun(&["--sdk", if is_ios { "iphoneos" } else { "macosx" }, "--show-sdk-path"]);

    let obj_file = out_dir.join(format!("{}.o", config.lib_name));
    let mut swiftc = Command::new("swiftc");
    swiftc
        .arg("-emit-object")
        .arg("-o")
        .arg(&obj_file)
        .arg("-sdk")
        .arg(sdk_path.trim())
        .arg("-import-objc-header")
        .arg(&bridging_header)
        .arg("-parse-as-library")
        .arg("-module-name")
        .arg(&config.lib_name)
        .arg("-target")
        .arg(swift_target(is_ios))
        .arg(&combined);

    let output = swiftc.output().expect("Failed to run swiftc");
    if !output.status.success() {
        eprintln!("swiftc args: {:?}", swiftc.get_args().collect::<Vec<_>>());
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        panic!("Swift compilation failed");
    }

    let lib_file = out_dir.join(format!("lib{}.a", config.lib_name));
    let ar_status = Command::new("ar")
        .arg("rcs")
        .arg(&lib_file)
        .arg(&obj_file)
        .status()
        .expect("Failed to run ar");
    assert!(ar_status.success(), "ar failed");

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static={}", config.lib_name);

    let swiftc_path = xcrun(&["--find", "swiftc"]);
    if let Some(toolchain) = Path::new(swiftc_path.trim()).parent().and_then(Path::parent) {
        let runtime = if is_ios { "iphoneos" } else { "macosx" };
        println!(
            "cargo:rustc-link-search=native={}",
            toolchain.join("lib/swift").join(runtime).display()
        );
    }

    for framework in &config.frameworks {
        println!("cargo:rustc-link-lib=framework={framework}");
    }
}

fn write_bridging_header(out_dir: &Path, pkg_name: &str) -> PathBuf {
    let core_h = out_dir.join("SwiftBridgeCore.h");
    let pkg_h = out_dir.join(pkg_name).join(format!("{pkg_name}.h"));
    let bridging_h = out_dir.join("Bridging-Header.h");

    let content = format!(
        "#include \"{}\"\n#include \"{}\"\n",
        core_h.display(),
        pkg_h.display()
    );
    fs::write(&bridging_h, content).expect("Failed to write bridging header");
    bridging_h
}

fn write_combined_source(
    out_dir: &Path,
    manifest_dir: &Path,
    config: &AppleSwiftConfig,
) -> PathBuf {
    let generated = [
        out_dir.join("SwiftBridgeCore.swift"),
        out_dir
            .join(&config.pkg_name)
            .join(format!("{}.swift", config.pkg_name)),
    ];

    let mut combined = String::new();
    for path in generated
        .iter()
        .cloned()
        .chain(config.swift_sources.iter().map(|s| manifest_dir.join(s)))
    {
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        combined.push_str(&source);
        combined.push('\n');
    }

    let combined_path = out_dir.join(format!("Combined{}.swift", config.lib_name));
    fs::write(&combined_path, combined).expect("Failed to write combined Swift file");
    combined_path
}

fn swift_target(is_ios: bool) -> &'static str {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    match (is_ios, arch.as_str()) {
        (true, _) => "arm64-apple-ios14.0",
        (false, "aarch64") => "arm64-apple-macos12.3",
        (false, _) => "x86_64-apple-macos12.3",
    }
}

fn xcrun(args: &[&str]) -> String {
    let output = Command::new("xcrun")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("xcrun {args:?} failed: {e}"));
    String::from_utf8(output.stdout).expect("xcrun printed invalid UTF-8")
}
