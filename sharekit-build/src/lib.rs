//! Shared build utilities for sharekit crates.
//!
//! This crate provides common functionality for:
//! - Apple: Swift bridge generation and Swift compilation
//! - Android: Kotlin → DEX compilation
//!
//! Both helpers key off `CARGO_CFG_TARGET_OS`, so a build script can call them
//! unconditionally and only the matching one does any work.
//!
//! # Usage
//!
//! In your `build.rs`:
//!
//! ```ignore
//! use sharekit_build::AppleSwiftConfig;
//!
//! fn main() {
//!     let config = AppleSwiftConfig::new("sharekit-share", "ShareHelper")
//!         .swift_source("src/sys/apple/share.swift")
//!         .framework("UIKit");
//!     sharekit_build::compile_swift("src/sys/apple/mod.rs", &config);
//!
//!     sharekit_build::build_kotlin(&["src/sys/android/ShareHelper.kt"]);
//! }
//! ```

#![warn(missing_docs)]

mod android;
mod apple;

pub use android::{AndroidConfig, build_kotlin, build_kotlin_with, find_android_jar, find_d8_jar};
pub use apple::{AppleSwiftConfig, compile_swift};

/// The `target_os` cfg value of the crate being built.
///
/// Build scripts run on the host, so `cfg!(target_os = ..)` describes the host,
/// not the target. Cargo exposes the real target through this variable.
#[must_use]
pub fn target_os() -> String {
    std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default()
}
