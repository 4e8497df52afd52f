use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the entire launcher backend.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── Version descriptor ──────────────────────────────
    #[error("Version descriptor not found: {0:?}")]
    DescriptorNotFound(PathBuf),

    #[error("Malformed version descriptor {path:?}: {source}")]
    MalformedDescriptor {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Client jar missing: {0:?}")]
    MissingClientJar(PathBuf),

    // ── Libraries ───────────────────────────────────────
    #[error("Invalid library coordinate: {0}")]
    InvalidCoordinate(String),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Auth ────────────────────────────────────────────
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Hardware fingerprint unavailable: {0}")]
    Fingerprint(String),

    // ── Java ────────────────────────────────────────────
    #[error("Java runtime error: {0}")]
    Java(String),

    // ── Archive ─────────────────────────────────────────
    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── Launch ──────────────────────────────────────────
    #[error("Launch failed: {0}")]
    Launch(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl LauncherError {
    /// Attach a concrete path to a bare IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LauncherError::Io {
            path: path.into(),
            source,
        }
    }
}
