//! Build script for detecting system dependencies and providing installation guidance.
//!
//! The X11 check covers media key injection. OpenCV is only looked for when
//! the `preview` feature is enabled.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_PREVIEW").is_some() {
        check_opencv();
    }

    // Media keys go through the X server on Linux
    check_x11();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn pkg_config_version(module: &str) -> Option<String> {
    let output = Command::new("pkg-config").args(["--modversion", module]).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    match pkg_config_version("opencv4").or_else(|| pkg_config_version("opencv")) {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config; the preview window needs it.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev clang libclang-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn check_x11() {
    if !env::var("TARGET").unwrap_or_default().contains("linux") {
        return;
    }

    if pkg_config_version("xtst").is_none() {
        println!("cargo:warning=XTEST not found via pkg-config. The x11 dispatch backend needs an X server with XTEST.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install libxtst-dev");
    }
}
