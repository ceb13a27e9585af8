//! Stamps the binary with build metadata shown by `winscript version`

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!(
        "cargo:rustc-env=WINSCRIPT_BUILD_DATE={}",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    if let Some(sha) = git(&["rev-parse", "--short", "HEAD"]) {
        println!("cargo:rustc-env=WINSCRIPT_GIT_SHA={sha}");
    }
    // Uncommitted changes to sources or templates
    if git(&["status", "--porcelain", "--untracked-files=no"]).is_some_and(|s| !s.is_empty()) {
        println!("cargo:rustc-env=WINSCRIPT_GIT_DIRTY=1");
    }

    for (name, var) in [("WINSCRIPT_TARGET", "TARGET"), ("WINSCRIPT_PROFILE", "PROFILE")] {
        if let Ok(value) = std::env::var(var) {
            println!("cargo:rustc-env={name}={value}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
