//! Holds the single data file staged for the next campaign submission.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const FILE_PROMPT: &str = "Drag & drop your file here or click to browse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

impl StagedFile {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
        })
    }

    /// Size in KiB with one decimal, e.g. `"1.5 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

#[derive(Debug, Default)]
pub struct FileStager {
    current: Option<StagedFile>,
}

impl FileStager {
    /// A new selection silently replaces the previous one; `None` clears.
    pub fn set_file(&mut self, file: Option<StagedFile>) {
        if let Some(file) = &file {
            tracing::debug!(name = %file.name, size_bytes = file.size_bytes, "staged data file");
        }
        self.current = file;
    }

    pub fn current_file(&self) -> Option<&StagedFile> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.set_file(None);
    }

    pub fn description(&self) -> String {
        match &self.current {
            Some(file) => format!("{} ({})", file.name, file.size_label()),
            None => FILE_PROMPT.to_string(),
        }
    }
}
