//! Android build utilities.
//!
//! Kotlin helpers are compiled against `android.jar` with `kotlinc`, then dexed
//! with `d8` into `$OUT_DIR/classes.dex`, which the crate embeds with
//! `include_bytes!` and loads at runtime through a `DexClassLoader`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Configuration for Kotlin → DEX compilation.
#[derive(Debug, Clone)]
pub struct AndroidConfig {
    /// Kotlin source files, relative to the crate manifest.
    pub kotlin_sources: Vec<PathBuf>,
    /// Minimum API level passed to `d8`.
    pub min_api: u32,
    /// Explicit `android.jar`; discovered from the SDK when `None`.
    pub android_jar: Option<PathBuf>,
}

impl AndroidConfig {
    /// Create a config with no sources and the default minimum API level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kotlin_sources: Vec::new(),
            min_api: 21,
            android_jar: None,
        }
    }

    /// Add a Kotlin source file.
    #[must_use]
    pub fn kotlin_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.kotlin_sources.push(path.into());
        self
    }

    /// Set the minimum API level.
    #[must_use]
    pub const fn min_api(mut self, level: u32) -> Self {
        self.min_api = level;
        self
    }

    /// Use a specific `android.jar` instead of searching the SDK.
    #[must_use]
    pub fn android_jar(mut self, path: impl Into<PathBuf>) -> Self {
        self.android_jar = Some(path.into());
        self
    }
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile Kotlin sources into `$OUT_DIR/classes.dex` with default settings.
///
/// Does nothing unless the target is Android.
pub fn build_kotlin(sources: &[&str]) {
    let config = sources
        .iter()
        .fold(AndroidConfig::new(), |config, source| config.kotlin_source(*source));
    build_kotlin_with(&config);
}

/// Compile Kotlin sources into `$OUT_DIR/classes.dex`.
///
/// Does nothing unless the target is Android.
///
/// # Panics
/// Panics if the Android SDK, `kotlinc` or `d8` cannot be found or fail.
pub fn build_kotlin_with(config: &AndroidConfig) {
    if crate::target_os() != "android" {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    println!("cargo:rerun-if-env-changed=ANDROID_HOME");
    println!("cargo:rerun-if-env-changed=ANDROID_SDK_ROOT");
    for source in &config.kotlin_sources {
        println!("cargo:rerun-if-changed={}", manifest_dir.join(source).display());
    }

    let android_jar = config
        .android_jar
        .clone()
        .or_else(find_android_jar)
        .expect("android.jar not found; set ANDROID_HOME");
    let d8_jar = find_d8_jar().expect("d8.jar not found; install Android build-tools");

    let classes_dir = out_dir.join("kotlin-classes");
    let _ = fs::remove_dir_all(&classes_dir);
    fs::create_dir_all(&classes_dir).expect("Failed to create class output directory");

    let status = Command::new("kotlinc")
        .arg("-classpath")
        .arg(&android_jar)
        .arg("-d")
        .arg(&classes_dir)
        .args(config.kotlin_sources.iter().map(|s| manifest_dir.join(s)))
        .status()
        .expect("Failed to run kotlinc");
    assert!(status.success(), "kotlinc failed");

    let mut class_files = Vec::new();
    collect_class_files(&classes_dir, &mut class_files);

    let status = Command::new("java")
        .arg("-cp")
        .arg(&d8_jar)
        .arg("com.android.tools.r8.D8")
        .arg("--min-api")
        .arg(config.min_api.to_string())
        .arg("--lib")
        .arg(&android_jar)
        .arg("--output")
        .arg(&out_dir)
        .args(&class_files)
        .status()
        .expect("Failed to run d8");
    assert!(status.success(), "d8 failed");
}

/// Locate the newest `platforms/android-*/android.jar` in the Android SDK.
#[must_use]
pub fn find_android_jar() -> Option<PathBuf> {
    let platforms = sdk_root()?.join("platforms");
    newest_versioned_dir(&platforms, "android-")
        .map(|dir| dir.join("android.jar"))
        .filter(|jar| jar.exists())
}

/// Locate `build-tools/<newest>/lib/d8.jar` in the Android SDK.
#[must_use]
pub fn find_d8_jar() -> Option<PathBuf> {
    let build_tools = sdk_root()?.join("build-tools");
    newest_versioned_dir(&build_tools, "")
        .map(|dir| dir.join("lib").join("d8.jar"))
        .filter(|jar| jar.exists())
}

fn sdk_root() -> Option<PathBuf> {
    env::var_os("ANDROID_HOME")
        .or_else(|| env::var_os("ANDROID_SDK_ROOT"))
        .map(PathBuf::from)
}

fn newest_versioned_dir(parent: &Path, prefix: &str) -> Option<PathBuf> {
    fs::read_dir(parent)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let version = name.strip_prefix(prefix)?;
            let key: Vec<u32> = version
                .split('.')
                .map(|part| part.parse().ok())
                .collect::<Option<_>>()?;
            Some((key, entry.path()))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| path)
}

fn collect_class_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.is_dir() {
            collect_class_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "class") {
            out.push(path);
        }
    }
}
