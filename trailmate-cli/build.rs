use std::path::{Path, PathBuf};
use std::process::Command;

fn git_short_sha(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = PathBuf::from(manifest).join("..");

    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());

    let sha = git_short_sha(&workspace).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TRAILMATE_BUILD_SHA={}", sha);
}
