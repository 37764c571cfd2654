/// Build metadata written into the `Generated with ...` comment of the MPD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub project_url: String,
    pub version: String,
}

impl VersionInfo {
    pub fn new(project_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into(),
            version: version.into(),
        }
    }

    /// Metadata of this package, taken from cargo at compile time.
    pub fn from_build() -> Self {
        Self::new(env!("CARGO_PKG_REPOSITORY"), env!("CARGO_PKG_VERSION"))
    }

    /// No version available. The generated-by comment is omitted.
    pub fn none() -> Self {
        Self::new("", "")
    }

    pub(crate) fn comment(&self) -> Option<String> {
        if self.version.is_empty() {
            return None;
        }
        Some(format!(
            "Generated with {} version {}",
            self.project_url, self.version
        ))
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::from_build()
    }
}
