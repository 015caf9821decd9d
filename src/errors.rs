//! Error Types
//!
//! [`ViewerError`] is the one error type of the crate. Loading failures end up
//! in the log and leave the status overlay on "LOADING"; rejected slider text
//! leaves the light where it was. Nothing here is shown to the visitor.
//!
//! Fallible APIs return [`Result<T>`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Model fetch and parse
    // ========================================================================
    #[error("Model file not found: {0}")]
    AssetNotFound(String),

    #[error("Could not read model: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed GLB container or glTF JSON.
    #[error("Invalid glTF: {0}")]
    GltfError(String),

    /// Parsed fine but holds no nodes to show.
    #[error("Model has no nodes: {0}")]
    EmptyModel(String),

    /// The loader thread or callback went away without sending a result.
    #[error("Model load for {0} ended without a result")]
    LoaderDisconnected(String),

    #[error("Request failed: {0}")]
    HttpError(String),

    #[error("Server answered with status {status}")]
    HttpResponseError { status: u16 },

    #[cfg(feature = "http")]
    #[error("Bad model URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// A URL was given to a build without the `http` feature.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),

    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Invalid viewer config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown easing curve: {0}")]
    InvalidEase(String),

    // ========================================================================
    // Page controls
    // ========================================================================
    /// Slider text that is not a finite number.
    #[error("Invalid value {value:?} for control {control}")]
    InvalidSliderValue { control: String, value: String },

    #[cfg(target_arch = "wasm32")]
    #[error("JavaScript callback failed: {0}")]
    WasmError(String),
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        Self::GltfError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
