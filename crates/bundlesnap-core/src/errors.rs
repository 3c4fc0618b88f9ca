use bundlesnap_core_types::PathId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in the snapshot pipeline maps to one of these kinds. The
/// kind decides how far the failure travels: invocation-level kinds stop the
/// CLI, bundle-level kinds skip one bundle, object-level kinds produce an
/// error-shaped document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Invocation
    InvalidInput,
    NotFound,
    NoInputFiles,

    // Bundle
    BundleLoad,
    EmptyBundle,
    InvalidVersion,

    // Object
    ObjectParse,
    MeshDecode,
    TextureDecode,

    // Snapshot directories
    InvalidSnapshot,

    // Integration/IO
    Io,
    Serialization,
    Image,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NoInputFiles => "ERR_NO_INPUT_FILES",
            ExErrorKind::BundleLoad => "ERR_BUNDLE_LOAD",
            ExErrorKind::EmptyBundle => "ERR_EMPTY_BUNDLE",
            ExErrorKind::InvalidVersion => "ERR_INVALID_VERSION",
            ExErrorKind::ObjectParse => "ERR_OBJECT_PARSE",
            ExErrorKind::MeshDecode => "ERR_MESH_DECODE",
            ExErrorKind::TextureDecode => "ERR_TEXTURE_DECODE",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Image => "ERR_IMAGE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, file path, object identifier) for the progress report.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    path_id: Option<PathId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            path_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.path = Some(path.as_ref().display().to_string());
        self
    }

    /// Add object identifier context
    pub fn with_path_id(mut self, path_id: PathId) -> Self {
        self.path_id = Some(path_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the filesystem path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the object identifier, if any
    pub fn path_id(&self) -> Option<PathId> {
        self.path_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(path_id) = self.path_id {
            write!(f, " (path_id: {})", path_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised by an asset library implementation
///
/// These cross the library boundary; the pipeline converts them into
/// [`ExError`] with the matching kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LibraryError {
    /// The container could not be opened or parsed
    #[error("Failed to load bundle: {reason}")]
    Load { reason: String },

    /// An object's property tree could not be produced
    #[error("{reason}")]
    Parse { path_id: PathId, reason: String },

    /// Mesh geometry could not be decoded
    #[error("{reason}")]
    MeshDecode { path_id: PathId, reason: String },

    /// Texture pixels could not be decoded
    #[error("{reason}")]
    TextureDecode { path_id: PathId, reason: String },

    /// The requested object is not part of this asset file
    #[error("Object not found: {path_id}")]
    ObjectNotFound { path_id: PathId },
}

impl From<LibraryError> for ExError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::Load { reason } => ExError::new(ExErrorKind::BundleLoad)
                .with_op("load_bundle")
                .with_message(reason),

            LibraryError::Parse { path_id, reason } => ExError::new(ExErrorKind::ObjectParse)
                .with_op("parse_object")
                .with_path_id(path_id)
                .with_message(reason),

            LibraryError::MeshDecode { path_id, reason } => {
                ExError::new(ExErrorKind::MeshDecode)
                    .with_op("decode_mesh")
                    .with_path_id(path_id)
                    .with_message(reason)
            }

            LibraryError::TextureDecode { path_id, reason } => {
                ExError::new(ExErrorKind::TextureDecode)
                    .with_op("decode_texture")
                    .with_path_id(path_id)
                    .with_message(reason)
            }

            LibraryError::ObjectNotFound { path_id } => ExError::new(ExErrorKind::NotFound)
                .with_path_id(path_id)
                .with_message("Object not found in asset file"),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_level_codes() {
        let cases = [
            (ExErrorKind::BundleLoad, "ERR_BUNDLE_LOAD"),
            (ExErrorKind::EmptyBundle, "ERR_EMPTY_BUNDLE"),
            (ExErrorKind::NoInputFiles, "ERR_NO_INPUT_FILES"),
            (ExErrorKind::MeshDecode, "ERR_MESH_DECODE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("write_manifest")
            .with_path("/tmp/out/manifest.json")
            .with_message("disk full");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_IO]"));
        assert!(rendered.contains("write_manifest"));
        assert!(rendered.contains("disk full"));
        assert!(rendered.contains("/tmp/out/manifest.json"));
    }

    #[test]
    fn test_parse_error_keeps_bare_reason() {
        let err = LibraryError::Parse {
            path_id: PathId::new(7),
            reason: "unknown type tree".to_string(),
        };
        assert_eq!(err.to_string(), "unknown type tree");
    }
}
