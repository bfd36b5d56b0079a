//! Tolerances used by the CSG engine and the mesh pipelines.
//!
//! Every [`Csg`](crate::Csg) context carries its own [`CsgConfig`], so two
//! contexts with different tolerances can run side by side.
//!
//! # Example
//!
//! ```
//! use bsp_csg::CsgConfig;
//!
//! let config = CsgConfig::default()
//!     .with_epsilon_scale(10.0)
//!     .with_weld_epsilon(1e-3);
//! assert!(config.plane_epsilon() > CsgConfig::default().plane_epsilon());
//! ```

use crate::PLANE_EPSILON;

/// Quantization step used when welding vertices by position.
pub const DEFAULT_WELD_EPSILON: f32 = 1e-4;

/// Slack added to both sides of every bounding box comparison.
pub const DEFAULT_BOX_EPSILON: f32 = 1e-5;

/// Configuration for boolean operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsgConfig {
    /// Multiplier applied to [`PLANE_EPSILON`] when classifying points against planes.
    pub epsilon_scale: f32,

    /// Grid size for welding positions into shared vertex ids.
    pub weld_epsilon: f32,

    /// Tolerance for the bounding box pre-filter.
    pub box_epsilon: f32,

    /// Triangles whose squared cross product length is at or below this value
    /// are dropped on ingestion.
    pub degenerate_tolerance: f32,
}

impl Default for CsgConfig {
    fn default() -> Self {
        Self {
            epsilon_scale: 1.0,
            weld_epsilon: DEFAULT_WELD_EPSILON,
            box_epsilon: DEFAULT_BOX_EPSILON,
            degenerate_tolerance: 0.0,
        }
    }
}

impl CsgConfig {
    /// Default configuration with the plane epsilon scaled by `scale`.
    ///
    /// Useful for meshes modelled in large units, where `1e-5` is below the
    /// precision of the input coordinates.
    #[must_use]
    pub fn relaxed(scale: f32) -> Self {
        Self::default().with_epsilon_scale(scale)
    }

    /// Returns the tolerance used for point/plane classification.
    #[inline]
    pub fn plane_epsilon(&self) -> f32 {
        PLANE_EPSILON * self.epsilon_scale
    }

    /// Set the plane epsilon multiplier.
    #[must_use]
    pub fn with_epsilon_scale(mut self, scale: f32) -> Self {
        self.epsilon_scale = scale;
        self
    }

    /// Set the welding grid size.
    #[must_use]
    pub fn with_weld_epsilon(mut self, epsilon: f32) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Set the bounding box tolerance.
    #[must_use]
    pub fn with_box_epsilon(mut self, epsilon: f32) -> Self {
        self.box_epsilon = epsilon;
        self
    }

    /// Set the degenerate triangle threshold.
    #[must_use]
    pub fn with_degenerate_tolerance(mut self, tolerance: f32) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }
}
