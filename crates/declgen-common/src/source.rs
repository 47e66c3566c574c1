//! Source identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of one input module, as given by the embedding caller.
///
/// Usually a path-like string (`src/Widget.ts`). The default output sink
/// derives the location of a generated unit from the containing location of
/// this identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The containing location, for siblings of this source.
    pub fn directory(&self) -> &Path {
        Path::new(&self.0).parent().unwrap_or_else(|| Path::new(""))
    }

    /// Path of a file placed beside this source.
    pub fn sibling(&self, file_name: &str) -> PathBuf {
        self.directory().join(file_name)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
