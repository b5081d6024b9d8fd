use std::fmt;
use std::sync::Arc;

use base64::Engine as _;

use crate::assets::decode::SourceLimits;
use crate::foundation::error::{PrintcompError, PrintcompResult};

/// Where an image layer's pixels come from.
///
/// Fetching remote sources is the caller's job (upload/storage layer); the compositor only reads
/// bytes that are already local or inlined.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Relative path, resolved against a [`crate::SourceResolver`] root.
    Path(String),
    /// `data:<mime>;base64,<payload>` decoded up front.
    Inline { mime: String, bytes: Arc<Vec<u8>> },
    /// `http(s)://` URL that has not been fetched yet.
    Remote(String),
}

impl SourceRef {
    /// Parse a source string as found in render requests, with default [`SourceLimits`].
    pub fn parse(s: &str) -> PrintcompResult<Self> {
        Self::parse_with_limits(s, &SourceLimits::default())
    }

    /// Parse a source string; inline payloads over `limits.max_encoded_bytes` are rejected
    /// before they are decoded.
    pub fn parse_with_limits(s: &str, limits: &SourceLimits) -> PrintcompResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PrintcompError::invalid_input("image source must be non-empty"));
        }
        if let Some(rest) = s.strip_prefix("data:") {
            return parse_data_url(rest, limits);
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Remote(s.to_owned()));
        }
        Ok(Self::Path(normalize_rel_path(s)?))
    }

    /// Best-effort check for SVG content, used to pick a rasterizer.
    pub fn looks_like_svg(&self) -> bool {
        match self {
            Self::Path(p) => p.to_ascii_lowercase().ends_with(".svg"),
            Self::Inline { mime, .. } => mime.eq_ignore_ascii_case("image/svg+xml"),
            Self::Remote(u) => u.to_ascii_lowercase().ends_with(".svg"),
        }
    }
}

impl fmt::Debug for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{p}"),
            Self::Inline { mime, bytes } => write!(f, "data:{mime} ({} bytes)", bytes.len()),
            Self::Remote(u) => write!(f, "{u}"),
        }
    }
}

fn parse_data_url(rest: &str, limits: &SourceLimits) -> PrintcompResult<SourceRef> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PrintcompError::invalid_input("data url is missing ','"))?;
    let Some(mime) = meta.strip_suffix(";base64") else {
        return Err(PrintcompError::invalid_input(
            "only base64 data urls are supported",
        ));
    };
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    let payload = payload.trim();
    // Lower bound on the decoded size: padding removes at most two bytes.
    limits.check_encoded_len((payload.len() / 4 * 3).saturating_sub(2))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| PrintcompError::invalid_input(format!("data url payload: {e}")))?;
    if bytes.is_empty() {
        return Err(PrintcompError::invalid_input("data url payload is empty"));
    }
    Ok(SourceRef::Inline {
        mime: mime.to_ascii_lowercase(),
        bytes: Arc::new(bytes),
    })
}

/// Normalize and validate request-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> PrintcompResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') || s.chars().nth(1) == Some(':') {
        return Err(PrintcompError::invalid_input("source paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PrintcompError::invalid_input(
                "source paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PrintcompError::invalid_input(
            "source path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
