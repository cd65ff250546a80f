//! Staging: collect a sub-project's build outputs into the package tree.

use std::fs;

use anyhow::{Context, Result};

use super::{msbuild, BuildContext};

/// Copy everything from `proj/<subproject>/bin/<configuration>` into
/// `<package>/<subproject>`, creating the destination as needed. Files
/// already staged by an earlier run are overwritten. Only direct entries
/// are copied; the output directory is flat.
pub fn copy_outputs(ctx: &BuildContext, package: &str, subproject: &str) -> Result<()> {
    let src = ctx
        .root
        .join(msbuild::PROJECT_DIR)
        .join(subproject)
        .join("bin")
        .join(ctx.flavor.configuration());
    let dst = ctx.root.join(package).join(subproject);

    fs::create_dir_all(&dst)
        .with_context(|| format!("creating staging directory {}", dst.display()))?;

    let entries = fs::read_dir(&src)
        .with_context(|| format!("reading build output {}", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading build output {}", src.display()))?;
        let target = dst.join(entry.file_name());
        println!("{} -> {}", entry.path().display(), dst.display());
        fs::copy(entry.path(), &target)
            .with_context(|| format!("staging {}", entry.path().display()))?;
    }
    Ok(())
}
