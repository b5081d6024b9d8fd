use std::fmt;

pub type PrintcompResult<T> = Result<T, PrintcompError>;

/// Which guardrail a source image tripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLimit {
    /// Source width in pixels.
    Width,
    /// Source height in pixels.
    Height,
    /// Source `width * height`.
    PixelCount,
    /// Size of the encoded payload in bytes.
    EncodedBytes,
}

impl fmt::Display for ResourceLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::PixelCount => "pixel count",
            Self::EncodedBytes => "encoded bytes",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PrintcompError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("resource exceeded: source {limit} {actual} exceeds maximum {max}")]
    ResourceExceeded {
        limit: ResourceLimit,
        actual: u64,
        max: u64,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrintcompError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn resource_exceeded(limit: ResourceLimit, actual: u64, max: u64) -> Self {
        Self::ResourceExceeded { limit, actual, max }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, Self::ResourceExceeded { .. })
    }
}

impl From<serde_json::Error> for PrintcompError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
