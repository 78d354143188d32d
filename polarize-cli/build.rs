use std::path::Path;
use std::process::Command;

/// Short commit of the workspace checkout, if git is available
fn git_short_sha(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = Path::new(&manifest).join("..");

    // Tarball builds have no .git; the version then reads "0.1.0 (dev)".
    let git_head = workspace.join(".git").join("HEAD");
    if git_head.exists() {
        println!("cargo:rerun-if-changed={}", git_head.display());
    }

    let sha = git_short_sha(&workspace).unwrap_or_else(|| "dev".to_string());
    println!("cargo:rustc-env=POLARIZE_BUILD_SHA={sha}");
}
