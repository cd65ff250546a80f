//! Version-control queries against the checkout.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// List every tracked file, relative to `root`.
pub fn ls_files(root: &Path) -> Result<Vec<String>> {
    let stdout = git(root, &["ls-files"])?;
    Ok(stdout.lines().map(str::to_string).collect())
}

/// The checkout's current revision.
pub fn revision(root: &Path) -> Result<String> {
    Ok(git(root, &["rev-parse", "HEAD"])?.trim().to_string())
}

fn git(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .context("failed to run git")?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
