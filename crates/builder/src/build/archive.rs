//! Tar archive creation, plain or gzip-compressed, strict or best-effort.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Archiving behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Gzip the stream instead of writing a plain tar.
    pub gzip: bool,
    /// Skip entries that cannot be added instead of failing the archive.
    pub best_effort: bool,
}

/// Create `dest` containing `entries`, each resolved against `base` and
/// stored under its relative name. Directory entries are added
/// recursively.
pub fn create<P: AsRef<Path>>(
    dest: &Path,
    base: &Path,
    entries: &[P],
    options: Options,
) -> Result<()> {
    let file =
        File::create(dest).with_context(|| format!("creating archive {}", dest.display()))?;

    if options.gzip {
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        append_entries(&mut builder, base, entries, options.best_effort)?;
        builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .with_context(|| format!("finishing archive {}", dest.display()))?;
    } else {
        let mut builder = tar::Builder::new(file);
        append_entries(&mut builder, base, entries, options.best_effort)?;
        builder
            .into_inner()
            .with_context(|| format!("finishing archive {}", dest.display()))?;
    }
    Ok(())
}

fn append_entries<W: Write, P: AsRef<Path>>(
    builder: &mut tar::Builder<W>,
    base: &Path,
    entries: &[P],
    best_effort: bool,
) -> Result<()> {
    for entry in entries {
        let name = entry.as_ref();
        let path = base.join(name);
        if let Err(err) = append_one(builder, name, &path) {
            // Lenient mode swallows every per-entry error kind, not just
            // missing paths; the archive is still finalized.
            if best_effort {
                continue;
            }
            return Err(err).with_context(|| format!("adding {} to archive", name.display()));
        }
    }
    Ok(())
}

fn append_one<W: Write>(
    builder: &mut tar::Builder<W>,
    name: &Path,
    path: &Path,
) -> std::io::Result<()> {
    if path.metadata()?.is_dir() {
        builder.append_dir_all(name, path)
    } else {
        builder.append_path_with_name(path, name)
    }
}
