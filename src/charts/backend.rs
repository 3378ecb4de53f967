//! Seam to the charting library.
//!
//! The library is a black box: a constructor taking a canvas and a
//! configuration and returning something that can be destroyed, plus a set
//! of global style defaults.

use serde::Serialize;
use thiserror::Error;

use super::ChartConfig;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart library is not loaded")]
    LibraryMissing,

    #[error("canvas `{0}` not found")]
    CanvasMissing(String),

    #[error("failed to construct chart on `{canvas}`: {reason}")]
    Construct { canvas: String, reason: String },

    #[error("failed to destroy chart: {0}")]
    Destroy(String),

    #[error("failed to apply chart defaults: {0}")]
    Defaults(String),
}

/// Process-wide style defaults applied before each rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefaults {
    /// Default text colour
    pub color: String,
    /// Default border and grid colour
    pub border_color: String,
    /// Computed body font family, when the page reports one
    pub font_family: Option<String>,
}

/// A live chart instance.
pub trait ChartHandle {
    /// Release the instance. Must be safe to call on an instance that was
    /// already destroyed or never finished initialising.
    fn destroy(&mut self) -> Result<(), ChartError>;
}

pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Whether the library is loaded. When it is not, a rebuild releases
    /// the existing charts and builds nothing.
    fn is_available(&mut self) -> bool {
        true
    }

    fn apply_defaults(&mut self, defaults: &ChartDefaults) -> Result<(), ChartError>;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<Self::Handle, ChartError>;
}
