use std::path::{Path, PathBuf};

use crate::Res;

/// Writes report files under the configured output directory, creating
/// parent directories as needed.
///
/// Reports come in two shapes: plain files that contain only data lines,
/// and dated files that carry a `Generated on MM/DD/YYYY` first line so a
/// reader can tell how stale a long-lived report is.
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: &Path) -> Self {
        ReportWriter {
            root: output_dir.to_path_buf(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Writes one line per entry, no header.
    pub async fn write(&self, relative: &str, lines: &[String]) -> Res<()> {
        self.write_file(relative, lines, None).await
    }

    /// Writes one line per entry under a `Generated on` header.
    pub async fn write_dated(&self, relative: &str, lines: &[String]) -> Res<()> {
        self.write_file(relative, lines, Some(generated_header()))
            .await
    }

    async fn write_file(
        &self,
        relative: &str,
        lines: &[String],
        header: Option<String>,
    ) -> Res<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let mut content = String::new();
        if let Some(header) = header {
            content.push_str(&header);
            content.push('\n');
        }
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }

        async_fs::write(path, content).await?;
        Ok(())
    }
}

pub fn generated_header() -> String {
    format!("Generated on {}", chrono::Local::now().format("%m/%d/%Y"))
}
