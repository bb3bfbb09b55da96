//! Mapping of in-archive entries to repository source paths.

const CLASS_SUFFIX: &str = ".class";
const SOURCE_SUFFIX: &str = ".java";

pub fn strip_leading_separator(entry: &str) -> &str {
    entry.trim_start_matches('/')
}

pub fn is_compiled_class(entry: &str) -> bool {
    entry.ends_with(CLASS_SUFFIX)
}

/// Returns the source-file path for a compiled class, or the entry itself.
///
/// Nested types (`Outer$Inner.class`) live in their top-level type's file, so
/// the file name is cut at the first `$` before the suffix is swapped.
pub fn to_source_path(entry: &str) -> String {
    let entry = strip_leading_separator(entry);
    let Some(stem) = entry.strip_suffix(CLASS_SUFFIX) else {
        return entry.to_string();
    };

    let (dir, file) = match stem.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, stem),
    };
    let top_level = file.split('$').next().unwrap_or(file);

    match dir {
        Some(dir) => format!("{}/{}{}", dir, top_level, SOURCE_SUFFIX),
        None => format!("{}{}", top_level, SOURCE_SUFFIX),
    }
}

/// What a resolution is looking for inside the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Source file behind a compiled class
    Source(String),
    /// Resource file or directory, located verbatim
    Resource(String),
    /// No entry: the artifact's own directory or the repository root
    Artifact,
}

impl Target {
    pub fn from_entry(entry: Option<&str>) -> Self {
        match entry.map(strip_leading_separator) {
            Some(entry) if is_compiled_class(entry) => Self::Source(to_source_path(entry)),
            Some(entry) if !entry.is_empty() => Self::Resource(entry.to_string()),
            _ => Self::Artifact,
        }
    }

    /// Repository-relative path being searched for; empty for `Artifact`.
    pub fn path(&self) -> &str {
        match self {
            Self::Source(path) | Self::Resource(path) => path,
            Self::Artifact => "",
        }
    }
}
