use std::path::Path;
use std::process::Command;

/// Embeds a short git description in `CHROMANOTE_GIT_HASH` for `--version`.
fn main() {
    let describe = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=CHROMANOTE_GIT_HASH={describe}");

    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        for tracked in ["HEAD", "index", "packed-refs", "refs"] {
            let path = Path::new(&git_dir).join(tracked);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
