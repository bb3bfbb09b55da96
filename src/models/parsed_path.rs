//! Maven coordinates recovered from a dependency-cache path.

use packageurl::PackageUrl;
use serde::Serialize;

use crate::entry;

/// Coordinates and in-archive entry parsed from a cache path.
///
/// `group_id`, `artifact_id` and `version` are never blank. `entry_path` is
/// `None` when the raw path named the archive itself; otherwise it is
/// non-blank and carries no leading separator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedPath {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub entry_path: Option<String>,
}

impl ParsedPath {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        entry_path: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            entry_path,
        }
    }

    /// `groupId:artifactId:version`
    pub fn gav(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Package URL in the `pkg:maven/{group}/{artifact}@{version}` form.
    pub fn purl(&self) -> Option<String> {
        let mut purl = PackageUrl::new("maven", self.artifact_id.as_str()).ok()?;
        purl.with_namespace(self.group_id.as_str()).ok()?;
        purl.with_version(self.version.as_str()).ok()?;
        Some(purl.to_string())
    }

    pub fn is_compiled_entry(&self) -> bool {
        self.entry_path
            .as_deref()
            .is_some_and(entry::is_compiled_class)
    }

    /// Repository-relative path of the human-authored file behind the entry.
    ///
    /// Compiled classes map to their top-level `.java` source; every other
    /// entry is returned untouched.
    pub fn source_path(&self) -> Option<String> {
        self.entry_path.as_deref().map(entry::to_source_path)
    }

    pub fn source_file_name(&self) -> Option<String> {
        let source = self.source_path()?;
        let name = source.rsplit('/').next().unwrap_or(&source);
        Some(name.to_string())
    }

    /// Directory part of the source path; empty for the default package.
    pub fn package_path(&self) -> Option<String> {
        let source = self.source_path()?;
        Some(
            source
                .rsplit_once('/')
                .map(|(dir, _)| dir.to_string())
                .unwrap_or_default(),
        )
    }
}
