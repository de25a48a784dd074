//! Document attachment adapter
//!
//! The terminal has no native file picker, so the user types a path and the
//! adapter turns it into a [`DocumentHandle`].

use crate::state::forms::DocumentHandle;
use std::path::{Path, PathBuf};

/// Extensions accepted as proof: PDF plus common image formats
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "gif", "webp", "heic"];

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("unsupported document type '{0}' (expected a PDF or an image)")]
    UnsupportedType(String),
    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces document handles on user request
pub trait DocumentAttachmentAdapter {
    /// `Ok(None)` means the user cancelled; errors are genuine failures
    fn attach(&self, input: &str) -> Result<Option<DocumentHandle>, AttachmentError>;
}

/// Resolves a typed filesystem path into a `file://` handle
#[derive(Debug, Clone, Default)]
pub struct PathAttachmentAdapter {
    base_dir: Option<PathBuf>,
}

impl PathAttachmentAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir` instead of the working directory
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    fn resolve(&self, input: &str) -> PathBuf {
        let path = Path::new(input);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentAttachmentAdapter for PathAttachmentAdapter {
    fn attach(&self, input: &str) -> Result<Option<DocumentHandle>, AttachmentError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let path = self.resolve(input);
        if !path.exists() {
            return Err(AttachmentError::NotFound(path));
        }
        let path = path.canonicalize()?;
        if !path.metadata()?.is_file() {
            return Err(AttachmentError::NotAFile(path));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AttachmentError::UnsupportedType(extension));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let locator = format!("file://{}", path.display());

        Ok(Some(DocumentHandle::new(name, locator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    /// Scratch directory removed on drop
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("verify-tui-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn file(&self, name: &str) -> PathBuf {
            let path = self.0.join(name);
            fs::write(&path, b"%PDF-1.4").unwrap();
            path
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_empty_input_is_cancellation() {
        let adapter = PathAttachmentAdapter::new();
        assert!(adapter.attach("").unwrap().is_none());
        assert!(adapter.attach("   ").unwrap().is_none());
    }

    #[test]
    fn test_pdf_produces_file_handle() {
        let scratch = ScratchDir::new();
        let path = scratch.file("justificatif.pdf");
        let adapter = PathAttachmentAdapter::new();

        let handle = adapter
            .attach(path.to_str().unwrap())
            .unwrap()
            .expect("handle");

        assert_eq!(handle.name, "justificatif.pdf");
        assert!(handle.locator.starts_with("file://"));
        assert!(handle.locator.ends_with("justificatif.pdf"));
    }

    #[test]
    fn test_relative_path_uses_base_dir_and_any_case_extension() {
        let scratch = ScratchDir::new();
        scratch.file("scan.JPG");
        let adapter = PathAttachmentAdapter::with_base_dir(&scratch.0);

        let handle = adapter.attach("scan.JPG").unwrap().expect("handle");

        assert_eq!(handle.name, "scan.JPG");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let scratch = ScratchDir::new();
        let adapter = PathAttachmentAdapter::with_base_dir(&scratch.0);
        assert!(matches!(
            adapter.attach("nope.pdf"),
            Err(AttachmentError::NotFound(_))
        ));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let scratch = ScratchDir::new();
        scratch.file("notes.txt");
        let adapter = PathAttachmentAdapter::with_base_dir(&scratch.0);
        let err = adapter.attach("notes.txt").unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(ref ext) if ext == "txt"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let scratch = ScratchDir::new();
        fs::create_dir_all(scratch.0.join("folder.pdf")).unwrap();
        let adapter = PathAttachmentAdapter::with_base_dir(&scratch.0);
        assert!(matches!(
            adapter.attach("folder.pdf"),
            Err(AttachmentError::NotAFile(_))
        ));
    }
}
