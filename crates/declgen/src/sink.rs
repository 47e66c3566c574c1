//! Output sinks.
//!
//! A sink receives one successfully rendered declaration unit per class,
//! keyed by (source identity, class name). The default sink persists the
//! unit beside the source; tests use [`MemorySink`].

use declgen_common::SourceId;
use std::fs;
use std::io;
use std::path::PathBuf;

pub trait OutputSink {
    fn accept(&mut self, source: &SourceId, class_name: &str, declaration: &str)
    -> io::Result<()>;
}

/// Writes `<ClassName>.gen.d.ts` beside the source, or under a fixed
/// output directory when one is configured.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    out_dir: Option<PathBuf>,
}

impl FileSink {
    /// Sink writing beside each source.
    pub fn beside_sources() -> Self {
        Self::default()
    }

    pub fn into_directory(out_dir: PathBuf) -> Self {
        Self {
            out_dir: Some(out_dir),
        }
    }

    fn target_path(&self, source: &SourceId, class_name: &str) -> PathBuf {
        let file_name = format!("{class_name}.gen.d.ts");
        match &self.out_dir {
            Some(out_dir) => out_dir.join(file_name),
            None => source.sibling(&file_name),
        }
    }
}

impl OutputSink for FileSink {
    fn accept(
        &mut self,
        source: &SourceId,
        class_name: &str,
        declaration: &str,
    ) -> io::Result<()> {
        let path = self.target_path(source, class_name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!(path = %path.display(), "writing declaration unit");
        fs::write(path, declaration)
    }
}

/// Collects outputs in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub outputs: Vec<(SourceId, String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declaration_for(&self, class_name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(_, name, _)| name == class_name)
            .map(|(_, _, text)| text.as_str())
    }
}

impl OutputSink for MemorySink {
    fn accept(
        &mut self,
        source: &SourceId,
        class_name: &str,
        declaration: &str,
    ) -> io::Result<()> {
        self.outputs.push((
            source.clone(),
            class_name.to_string(),
            declaration.to_string(),
        ));
        Ok(())
    }
}
