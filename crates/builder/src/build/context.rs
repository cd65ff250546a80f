//! Build flavor, version resolution, and the context threaded through
//! every build step.

use std::env;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::{branding, msbuild};

const MAJOR: &str = "7";
const MINOR: &str = "0";
const MICRO: &str = "1";

/// Environment variable supplying the fourth version component.
pub const BUILD_NUMBER: &str = "BUILD_NUMBER";

/// Build flavor, mapped to the configuration handed to the build tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Flavor {
    /// Debug configuration with checked runtime assertions.
    #[value(name = "checked")]
    Checked,
    /// Optimized release configuration.
    #[value(name = "free")]
    Free,
}

impl Flavor {
    /// The configuration name the external tool understands.
    pub fn configuration(self) -> &'static str {
        match self {
            Flavor::Checked => "Debug",
            Flavor::Free => "Release",
        }
    }
}

/// Four-part package version. The first three components are fixed for a
/// release line; the build component comes from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: String,
    pub minor: String,
    pub micro: String,
    pub build: String,
}

impl Version {
    /// Resolve the version for this run. `BUILD_NUMBER` defaults to `0`
    /// when unset, so local builds always produce `x.y.z.0`.
    pub fn resolve() -> Self {
        Version {
            major: MAJOR.to_string(),
            minor: MINOR.to_string(),
            micro: MICRO.to_string(),
            build: env::var(BUILD_NUMBER).unwrap_or_else(|_| "0".to_string()),
        }
    }

    /// Dotted form, e.g. `7.0.1.53`.
    pub fn dotted(&self) -> String {
        format!("{}.{}.{}.{}", self.major, self.minor, self.micro, self.build)
    }
}

/// Everything a build step needs to know: where the checkout lives, which
/// flavor to build, the resolved version, and where to find its inputs.
/// Steps never consult process-wide state beyond this.
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Checkout root. All paths below are resolved against it.
    pub root: PathBuf,
    pub flavor: Flavor,
    pub version: Version,
    /// Branding table location.
    pub branding: PathBuf,
    /// Build tool invoked per solution, relative to the project directory.
    pub tool: PathBuf,
}

impl BuildContext {
    /// Context rooted at the current directory.
    pub fn new(flavor: Flavor) -> Self {
        Self::rooted(Path::new("."), flavor)
    }

    /// Context rooted at an explicit checkout directory.
    pub fn rooted(root: &Path, flavor: Flavor) -> Self {
        BuildContext {
            root: root.to_path_buf(),
            flavor,
            version: Version::resolve(),
            branding: root.join(branding::BRANDING_FILE),
            tool: PathBuf::from(msbuild::DEFAULT_TOOL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_configuration() {
        assert_eq!(Flavor::Checked.configuration(), "Debug");
        assert_eq!(Flavor::Free.configuration(), "Release");
    }

    #[test]
    fn test_version_dotted() {
        let version = Version {
            major: "7".to_string(),
            minor: "0".to_string(),
            micro: "1".to_string(),
            build: "53".to_string(),
        };
        assert_eq!(version.dotted(), "7.0.1.53");
    }

    // One test covers both the default and the override so two tests never
    // race on the same process-wide variable.
    #[test]
    fn test_version_resolve_reads_build_number() {
        env::remove_var(BUILD_NUMBER);
        assert_eq!(Version::resolve().dotted(), "7.0.1.0");

        env::set_var(BUILD_NUMBER, "53");
        assert_eq!(Version::resolve().dotted(), "7.0.1.53");
        env::remove_var(BUILD_NUMBER);
    }

    #[test]
    fn test_context_paths_follow_root() {
        let ctx = BuildContext::rooted(Path::new("/checkout"), Flavor::Free);
        assert_eq!(ctx.branding, Path::new("/checkout/branding/branding.json"));
        assert_eq!(ctx.tool, Path::new("msbuild.bat"));
    }

    #[test]
    fn test_selector_accepts_only_checked_and_free() {
        assert_eq!(Flavor::from_str("checked", false), Ok(Flavor::Checked));
        assert_eq!(Flavor::from_str("free", false), Ok(Flavor::Free));

        // Configuration names are not selectors.
        assert!(Flavor::from_str("debug", false).is_err());
        assert!(Flavor::from_str("Release", false).is_err());
        assert!(Flavor::from_str("", false).is_err());
    }
}
