//! Branding table: vendor-specific strings emitted into the generated
//! version header.
//!
//! The table lives in a JSON data file so rebranding touches no code.
//! Declaration order in the file is the emission order in the header.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Branding table location relative to the checkout root.
pub const BRANDING_FILE: &str = "branding/branding.json";

/// Ordered map of branding constant names to their string values.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct Branding {
    entries: serde_json::Map<String, serde_json::Value>,
}

impl Branding {
    /// Load and validate the branding table. Every value must be a string;
    /// anything else is a branding file bug worth failing loudly on.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading branding table {}", path.display()))?;
        let branding: Branding = serde_json::from_str(&text)
            .with_context(|| format!("parsing branding table {}", path.display()))?;
        branding.validate()?;
        Ok(branding)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in &self.entries {
            if !value.is_string() {
                bail!("branding value for {key:?} is not a string");
            }
        }
        Ok(())
    }

    /// Entries in declaration order. `validate` ran at load, so every
    /// value is a string here.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Branding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for (key, value) in self.iter() {
            f.write_str(sep)?;
            write!(f, "{key}={value}")?;
            sep = ", ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use anyhow::{bail, Result};

    fn write_branding(content: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_load_preserves_declaration_order() -> Result<()> {
        let file = write_branding(r#"{"Zeta": "last first", "Alpha": "first last"}"#)?;
        let branding = Branding::load(file.path())?;
        let keys: Vec<&str> = branding.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["Zeta", "Alpha"]);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Branding::load(Path::new("/nonexistent/branding.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_non_string_value() -> Result<()> {
        let file = write_branding(r#"{"ShortName": "Citrix", "CopyrightYears": 2012}"#)?;
        match Branding::load(file.path()) {
            Ok(_) => bail!("numeric branding value should be rejected"),
            Err(err) => assert!(format!("{err:#}").contains("CopyrightYears")),
        }
        Ok(())
    }

    #[test]
    fn test_empty_table_is_valid() -> Result<()> {
        let file = write_branding("{}")?;
        let branding = Branding::load(file.path())?;
        assert!(branding.is_empty());
        assert_eq!(branding.len(), 0);
        Ok(())
    }
}
