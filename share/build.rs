//! Build script for sharekit-share.

use sharekit_build::AppleSwiftConfig;

fn main() {
    let target_os = sharekit_build::target_os();

    if target_os == "ios" {
        let config = AppleSwiftConfig::new("sharekit-share", "ShareHelper")
            .swift_source("src/sys/apple/share.swift")
            .framework("UIKit");

        sharekit_build::compile_swift("src/sys/apple/mod.rs", &config);
    }

    if target_os == "android" {
        sharekit_build::build_kotlin(&["src/sys/android/ShareHelper.kt"]);
    }
}
