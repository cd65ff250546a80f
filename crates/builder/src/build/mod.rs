//! Package build pipeline for the Windows guest agent.
//!
//! Structure:
//! - `context` - flavor selection, version resolution, build context
//! - `branding` - branding table loaded from the static JSON data file
//! - `header` - generated version/branding source file
//! - `msbuild` - external build tool invocation
//! - `stage` - copying build outputs into the staging tree
//! - `archive` - tar/tgz creation, strict or best-effort
//! - `repo` - version-control listing and revision

pub mod archive;
pub mod branding;
pub mod context;
pub mod header;
pub mod msbuild;
pub mod repo;
pub mod stage;

use anyhow::{Context, Result};

pub use branding::Branding;
pub use context::{BuildContext, Flavor, Version};

/// Name of the package: the staging directory and the final tarball.
pub const PACKAGE: &str = "xenguestagent";

/// File recording the checkout revision, archived next to the staging tree.
pub const REVISION_FILE: &str = "revision";

/// Gzip snapshot of the tracked sources, placed inside the staging tree.
pub const SOURCE_SNAPSHOT: &str = "source.tgz";

/// Solutions passed to the external tool, each with the sub-projects staged
/// from its output. Order matters: built top to bottom.
pub const SOLUTIONS: &[(&str, &[&str])] = &[
    ("xenguestagent", &["xenguestagent", "xendpriv"]),
    ("xenupdater", &["xenupdater"]),
];

/// Run the whole package build: header, solutions, staging, archives.
pub fn run(ctx: &BuildContext) -> Result<()> {
    println!("=== Building {PACKAGE} ({}) ===\n", ctx.flavor.configuration());

    let branding = Branding::load(&ctx.branding)?;
    println!("  Branding: {branding}");
    header::write(ctx, &branding)?;

    // Every solution builds before anything is staged; a failing build
    // must not leave a partial staging tree.
    let msbuild = msbuild::Msbuild::new(ctx);
    for &(solution, _) in SOLUTIONS {
        msbuild.build(solution)?;
    }

    println!("=== Staging build outputs ===");
    for &(_, subprojects) in SOLUTIONS {
        for &subproject in subprojects {
            stage::copy_outputs(ctx, PACKAGE, subproject)?;
        }
    }

    source_snapshot(ctx)?;
    package_archive(ctx)?;

    println!("\n=== Build complete ===");
    println!("Package: {}", ctx.root.join(format!("{PACKAGE}.tar")).display());
    Ok(())
}

/// Snapshot every tracked file into `<package>/source.tgz` and record the
/// checkout revision beside the staging tree. Skipped with a warning when
/// the listing is unavailable.
fn source_snapshot(ctx: &BuildContext) -> Result<()> {
    println!("=== Creating source snapshot ===");

    let files = match repo::ls_files(&ctx.root) {
        Ok(files) => files,
        Err(err) => {
            println!("  Warning: no source listing, skipping snapshot ({err:#})");
            return Ok(());
        }
    };

    let dest = ctx.root.join(PACKAGE).join(SOURCE_SNAPSHOT);
    archive::create(
        &dest,
        &ctx.root,
        &files,
        archive::Options { gzip: true, best_effort: false },
    )?;
    println!("  Archived {} source files into {}", files.len(), dest.display());

    match repo::revision(&ctx.root) {
        Ok(revision) => {
            std::fs::write(ctx.root.join(REVISION_FILE), format!("{revision}\n"))
                .context("writing revision file")?;
            println!("  Revision {revision}");
        }
        Err(err) => println!("  Warning: revision unavailable ({err:#})"),
    }

    Ok(())
}

/// Bundle the staging tree and the revision file into `<package>.tar`.
/// Best effort: a missing revision file must not fail the package.
fn package_archive(ctx: &BuildContext) -> Result<()> {
    println!("=== Archiving package ===");

    let dest = ctx.root.join(format!("{PACKAGE}.tar"));
    archive::create(
        &dest,
        &ctx.root,
        &[PACKAGE, REVISION_FILE],
        archive::Options { gzip: false, best_effort: true },
    )?;
    println!("  Created {}", dest.display());
    Ok(())
}
