//! External build tool invocation.
//!
//! The tool is a wrapper script checked into the project directory. It
//! takes no arguments; configuration, platform, solution, and target are
//! passed through the child environment, and the child runs with the
//! project directory as its working directory. Nothing process-wide is
//! touched.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

use super::BuildContext;

/// Directory holding the solutions and the build tool, relative to the
/// checkout root.
pub const PROJECT_DIR: &str = "proj";

/// Default build tool, resolved inside the project directory.
pub const DEFAULT_TOOL: &str = "msbuild.bat";

const PLATFORM: &str = "Any CPU";
const TARGET: &str = "Build";

/// Invoker for one build run: fixed tool, project directory, and
/// configuration, parameterized per solution.
pub struct Msbuild {
    tool: PathBuf,
    project_dir: PathBuf,
    configuration: &'static str,
}

impl Msbuild {
    pub fn new(ctx: &BuildContext) -> Self {
        Msbuild {
            tool: ctx.tool.clone(),
            project_dir: ctx.root.join(PROJECT_DIR),
            configuration: ctx.flavor.configuration(),
        }
    }

    /// Build one solution, streaming the tool's output through. A missing
    /// tool or a non-zero exit aborts the run.
    pub fn build(&self, solution: &str) -> Result<()> {
        println!("=== Building solution {solution} ===");
        println!(
            "  CONFIGURATION={} PLATFORM=\"{PLATFORM}\" SOLUTION={solution} TARGET={TARGET} {}",
            self.configuration,
            self.tool.display()
        );

        let status = self
            .command()
            .current_dir(&self.project_dir)
            .env("CONFIGURATION", self.configuration)
            .env("PLATFORM", PLATFORM)
            .env("SOLUTION", solution)
            .env("TARGET", TARGET)
            .status()
            .with_context(|| format!("running {}", self.tool.display()))?;

        if !status.success() {
            bail!("{} failed for {solution} ({status})", self.tool.display());
        }
        Ok(())
    }

    #[cfg(windows)]
    fn command(&self) -> Command {
        // Batch files only run under the command interpreter.
        let mut command = Command::new("cmd");
        command.arg("/C").arg(&self.tool);
        command
    }

    #[cfg(not(windows))]
    fn command(&self) -> Command {
        // A bare file name would be looked up on PATH; anchoring it makes
        // relative tools resolve inside the project directory.
        if self.tool.is_absolute() {
            Command::new(&self.tool)
        } else {
            Command::new(Path::new(".").join(&self.tool))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    use anyhow::{bail, Result};

    use crate::build::Flavor;

    fn scratch(flavor: Flavor, script: &str) -> Result<(tempfile::TempDir, Msbuild)> {
        let dir = tempfile::tempdir()?;
        let project_dir = dir.path().join(PROJECT_DIR);
        std::fs::create_dir_all(&project_dir)?;

        let tool = project_dir.join(DEFAULT_TOOL);
        std::fs::write(&tool, script)?;
        let mut perms = std::fs::metadata(&tool)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool, perms)?;

        let ctx = BuildContext::rooted(dir.path(), flavor);
        let msbuild = Msbuild::new(&ctx);
        Ok((dir, msbuild))
    }

    #[test]
    fn test_build_passes_parameters_through_environment() -> Result<()> {
        let script = "#!/bin/sh\n\
                      {\n\
                      echo \"CONFIGURATION=$CONFIGURATION\"\n\
                      echo \"PLATFORM=$PLATFORM\"\n\
                      echo \"SOLUTION=$SOLUTION\"\n\
                      echo \"TARGET=$TARGET\"\n\
                      pwd\n\
                      } > captured.env\n";
        let (dir, msbuild) = scratch(Flavor::Free, script)?;

        msbuild.build("xenguestagent")?;

        let captured = std::fs::read_to_string(dir.path().join(PROJECT_DIR).join("captured.env"))?;
        assert!(captured.contains("CONFIGURATION=Release"));
        assert!(captured.contains("PLATFORM=Any CPU"));
        assert!(captured.contains("SOLUTION=xenguestagent"));
        assert!(captured.contains("TARGET=Build"));

        // The capture file landed in the project directory, so the child
        // ran there; the pwd line confirms it explicitly.
        let pwd = captured.lines().last().unwrap_or("");
        assert_eq!(
            Path::new(pwd).canonicalize()?,
            dir.path().join(PROJECT_DIR).canonicalize()?
        );
        Ok(())
    }

    #[test]
    fn test_checked_flavor_builds_debug_configuration() -> Result<()> {
        let script = "#!/bin/sh\necho \"$CONFIGURATION\" > captured.env\n";
        let (dir, msbuild) = scratch(Flavor::Checked, script)?;

        msbuild.build("xenguestagent")?;

        let captured = std::fs::read_to_string(dir.path().join(PROJECT_DIR).join("captured.env"))?;
        assert_eq!(captured.trim(), "Debug");
        Ok(())
    }

    #[test]
    fn test_build_fails_on_nonzero_exit() -> Result<()> {
        let (_dir, msbuild) = scratch(Flavor::Free, "#!/bin/sh\nexit 3\n")?;

        match msbuild.build("xenguestagent") {
            Ok(()) => bail!("a failing tool should abort the build"),
            Err(err) => assert!(format!("{err:#}").contains("failed for xenguestagent")),
        }
        Ok(())
    }

    #[test]
    fn test_build_fails_when_tool_missing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join(PROJECT_DIR))?;
        let ctx = BuildContext::rooted(dir.path(), Flavor::Free);

        assert!(Msbuild::new(&ctx).build("xenguestagent").is_err());
        Ok(())
    }
}
