use std::fmt;

/// Error type for building layers and renderers.
///
/// The per-frame render path never produces one of these; a cell that cannot
/// be drawn simply emits no quad.
#[derive(Debug)]
pub enum RenderError {
    /// A layer's GID array length does not match width * height
    InvalidLayerSize {
        /// Layer name
        name: String,
        /// width * height
        expected: usize,
        /// Length of the supplied data
        actual: usize,
    },
    /// Renderer configuration parsed but holds an unusable value
    InvalidConfig(String),
    /// Renderer configuration JSON could not be parsed
    Config(serde_json::Error),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Config(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidLayerSize {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Invalid layer size for layer '{}': expected {} cells, got {}",
                name, expected, actual
            ),
            RenderError::InvalidConfig(msg) => write!(f, "Invalid renderer config: {}", msg),
            RenderError::Config(e) => write!(f, "Renderer config parse error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Config(e) => Some(e),
            _ => None,
        }
    }
}
