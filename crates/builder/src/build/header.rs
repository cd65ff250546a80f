//! Generated version header: a C# class of string constants consumed by
//! the guest agent sources.

use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};

use super::{Branding, BuildContext, Version};

/// Header location relative to the checkout root. The parent directory is
/// part of the checkout, so it is never created here.
pub const HEADER_PATH: &str = "src/xenguestlib/VerInfo.cs";

/// Render the header. Same version and branding in, same bytes out, so a
/// rebuild without changes rewrites the file identically.
pub fn render(version: &Version, branding: &Branding) -> String {
    let mut out = String::new();
    out.push_str("public class XenVersions {\n");
    let _ = writeln!(out, "    public const string Version = \"{}\";", version.dotted());
    for (key, value) in branding.iter() {
        let _ = writeln!(out, "    public const string {} = \"{}\";", key, escape(value));
    }
    out.push_str("}\n");
    out
}

/// Write the header into the checkout, overwriting any previous build's.
pub fn write(ctx: &BuildContext, branding: &Branding) -> Result<()> {
    let path = ctx.root.join(HEADER_PATH);
    fs::write(&path, render(&ctx.version, branding))
        .with_context(|| format!("writing version header {}", path.display()))?;
    println!("  Generated {HEADER_PATH} ({})", ctx.version.dotted());
    Ok(())
}

// Backslash is the only character escaped; registry paths are the usual
// offenders. Values with quotes are not valid branding.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\")
}
