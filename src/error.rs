//! Error types.
//!
//! Nothing in this crate is fatal. Configuration errors are reported when a
//! [`crate::config::PageConfig`] is validated; storage errors are logged by the
//! theme controller and otherwise ignored.

/// A configuration record failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tilt max angle must be in (0, 90], got {0}")]
    TiltMaxAngle(f64),
    #[error("tilt max glare must be in [0, 1], got {0}")]
    TiltMaxGlare(f64),
    #[error("tilt perspective must be positive, got {0}")]
    TiltPerspective(f64),
    #[error("tilt scale must be positive, got {0}")]
    TiltScale(f64),
    #[error("gyroscope angle range {min}..{max} is empty")]
    GyroscopeRange { min: f64, max: f64 },
    #[error("carousel needs at least one breakpoint")]
    NoBreakpoints,
    #[error("first carousel breakpoint must start at width 0, got {0}")]
    FirstBreakpoint(f64),
    #[error("carousel breakpoints must be strictly ascending at width {0}")]
    UnorderedBreakpoints(f64),
    #[error("carousel breakpoint at width {0} shows zero slides")]
    ZeroSlidesPerView(f64),
    #[error("carousel spacing must be non-negative, got {0}")]
    NegativeSpacing(f64),
    #[error("theme classes must be distinct and non-empty")]
    ThemeClasses,
}

/// A preference could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}
