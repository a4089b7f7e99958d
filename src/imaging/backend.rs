//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify (read dimensions) and transcode (resize + re-encode). The
//! production implementation is [`RustBackend`](super::rust_backend::RustBackend)
//! — pure Rust, statically linked, no system dependencies.

use super::params::TranscodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Both operations take explicit paths/params so the rest of the codebase is
/// backend-agnostic and the batch driver can be tested with a mock.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a transcode: load, cover-fit resize, re-encode, write.
    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Mock backend that records operations without touching pixels.
    ///
    /// `transcode` writes a small placeholder file at the output path so
    /// callers that stat the output for size reporting see a real file.
    /// Paths listed in `fail_on` simulate corrupt inputs: any operation on
    /// them returns `ProcessingFailed`.
    pub struct MockBackend {
        pub dimensions: Dimensions,
        pub fail_on: Vec<String>,
        pub operations: RefCell<Vec<RecordedOp>>,
        /// Bytes written as the placeholder output file.
        pub output_bytes: usize,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Transcode {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u8,
        },
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self {
                dimensions: Dimensions {
                    width: 2000,
                    height: 1500,
                },
                fail_on: Vec::new(),
                operations: RefCell::new(Vec::new()),
                output_bytes: 16,
            }
        }
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(width: u32, height: u32) -> Self {
            Self {
                dimensions: Dimensions { width, height },
                ..Self::default()
            }
        }

        pub fn failing_on(names: &[&str]) -> Self {
            Self {
                fail_on: names.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }

        fn should_fail(&self, path: &Path) -> bool {
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.fail_on.iter().any(|f| *f == name)
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.to_string_lossy().into_owned()));
            if self.should_fail(path) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock decode failure: {}",
                    path.display()
                )));
            }
            Ok(self.dimensions)
        }

        fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Transcode {
                source: params.source.to_string_lossy().into_owned(),
                output: params.output.to_string_lossy().into_owned(),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });
            if self.should_fail(&params.source) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock encode failure: {}",
                    params.source.display()
                )));
            }
            std::fs::write(&params.output, vec![0u8; self.output_bytes])?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(800, 600);
        let dims = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_transcode_writes_placeholder_and_records() {
        use crate::imaging::{Codec, Quality};
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.jpg");

        let backend = MockBackend::new();
        backend
            .transcode(&TranscodeParams {
                source: "/source.jpg".into(),
                output: output.clone(),
                width: 800,
                height: 600,
                codec: Codec::Jpeg,
                quality: Quality::new(80),
            })
            .unwrap();

        assert!(output.exists());
        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Transcode {
                width: 800,
                height: 600,
                quality: 80,
                ..
            }
        ));
    }

    #[test]
    fn mock_fails_on_listed_names() {
        let backend = MockBackend::failing_on(&["corrupt.jpg"]);
        let result = backend.identify(Path::new("/images/corrupt.jpg"));
        assert!(result.is_err());

        let ok = backend.identify(Path::new("/images/fine.jpg"));
        assert!(ok.is_ok());
    }
}
