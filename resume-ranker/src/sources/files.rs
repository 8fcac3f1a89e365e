use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::sources::{DocumentSource, SourceDocument};

/// Explicit list of resume files
pub struct FileSource {
    paths: Vec<PathBuf>,
}

/// Every file in one directory, ordered by file name
pub struct DirectorySource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self) -> Result<Vec<SourceDocument>> {
        read_documents(&self.paths).await
    }

    fn name(&self) -> &str {
        "files"
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch(&self) -> Result<Vec<SourceDocument>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!("Directory {} has {} files", self.dir.display(), paths.len());
        read_documents(&paths).await
    }

    fn name(&self) -> &str {
        "directory"
    }
}

async fn read_documents(paths: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(document) = read_document(path).await? {
            documents.push(document);
        }
    }
    Ok(documents)
}

/// Read one `.txt` file; other formats are skipped with a warning
async fn read_document(path: &Path) -> Result<Option<SourceDocument>> {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| path.display().to_string());

    if id.ends_with(".txt") {
        let bytes = tokio::fs::read(path).await?;
        return Ok(Some(SourceDocument::new(id, decode_text(&bytes))));
    }

    if id.ends_with(".pdf") {
        tracing::warn!("⚠️ {}: PDF text extraction is not supported, convert to .txt first", id);
    } else {
        tracing::warn!("⚠️ {}: unsupported file type, expected .txt", id);
    }
    Ok(None)
}

/// Read any text file with the same lenient decoding as resumes
pub async fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(decode_text(&bytes))
}

/// UTF-8 decode, dropping invalid byte sequences
fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
