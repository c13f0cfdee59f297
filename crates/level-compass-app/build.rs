//! Copies `memory.x` next to the build output so the linker finds it from
//! inside the workspace, and stamps the firmware with version strings.

use std::{env, fs::File, io::Write, path::PathBuf, process::Command};

#[derive(Clone, Copy, PartialEq, Default)]
enum HwVersion {
    #[default]
    RevA,
    Dk,
}

impl HwVersion {
    fn as_str(self) -> &'static str {
        match self {
            Self::RevA => "rev-a",
            Self::Dk => "nrf52840-dk",
        }
    }
}

fn linker_data() -> &'static [u8] {
    include_bytes!("memory.x")
}

/// Short hash of `HEAD`, or `unknown` outside a git checkout.
fn git_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_owned())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn main() {
    let hw_features = [(cfg!(feature = "dk"), HwVersion::Dk)];

    let enabled_hw: Vec<HwVersion> = hw_features
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, version)| version)
        .collect();

    if enabled_hw.len() > 1 {
        panic!("At most one hardware feature may be enabled.");
    }

    let hw_ver = enabled_hw.first().copied().unwrap_or_default();

    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(linker_data())
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var("CARGO_FEATURE_DEFMT").is_ok() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    let pkg_version = env!("CARGO_PKG_VERSION");
    let git_hash = git_hash();
    println!("cargo:rustc-env=COMMIT_HASH={git_hash}");
    println!("cargo:rustc-env=FW_VERSION={pkg_version}-{git_hash}");
    println!("cargo:rustc-env=HW_VERSION={}", hw_ver.as_str());
}
