mod parsed_path;
mod resolution;

pub use parsed_path::ParsedPath;
pub use resolution::{Confidence, PathKind, PathResolution, Report, Resolution, Strategy};
