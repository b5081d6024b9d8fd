use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{EncodedImage, SourceImage, SourceLimits};
use crate::assets::source::SourceRef;
use crate::assets::svg::SvgImage;
use crate::foundation::error::{PrintcompError, PrintcompResult};

/// Turns a [`SourceRef`] into something the compositor can probe and resample.
///
/// This is the only place source bytes are read; rendering itself does no IO.
pub trait SourceResolver {
    fn resolve(&self, source: &SourceRef) -> PrintcompResult<Box<dyn SourceImage>>;
}

/// Resolves relative paths under a root directory; inline sources decode in place.
#[derive(Clone, Debug)]
pub struct FsSourceResolver {
    root: PathBuf,
    limits: SourceLimits,
}

impl FsSourceResolver {
    pub fn new(root: impl Into<PathBuf>, limits: SourceLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_path(&self, rel: &str) -> PrintcompResult<Vec<u8>> {
        let p = self.root.join(Path::new(rel));
        // Size check happens on metadata so oversized uploads are never read into memory.
        let meta = std::fs::metadata(&p).map_err(|e| {
            PrintcompError::invalid_input(format!("could not read image '{}': {e}", p.display()))
        })?;
        self.limits.check_encoded_len(meta.len() as usize)?;
        std::fs::read(&p).map_err(|e| {
            PrintcompError::invalid_input(format!("could not read image '{}': {e}", p.display()))
        })
    }
}

impl SourceResolver for FsSourceResolver {
    fn resolve(&self, source: &SourceRef) -> PrintcompResult<Box<dyn SourceImage>> {
        match source {
            SourceRef::Path(rel) => {
                let bytes = self.read_path(rel)?;
                open_bytes(Arc::new(bytes), source.looks_like_svg(), &self.limits)
            }
            SourceRef::Inline { bytes, .. } => {
                open_bytes(bytes.clone(), source.looks_like_svg(), &self.limits)
            }
            SourceRef::Remote(url) => Err(remote_unsupported(url)),
        }
    }
}

/// In-memory sources keyed by path, for callers that already fetched the bytes.
#[derive(Clone, Debug, Default)]
pub struct MemorySourceResolver {
    entries: BTreeMap<String, Arc<Vec<u8>>>,
    limits: SourceLimits,
}

impl MemorySourceResolver {
    pub fn new(limits: SourceLimits) -> Self {
        Self {
            entries: BTreeMap::new(),
            limits,
        }
    }

    /// Register bytes under a path or URL exactly as it appears in requests.
    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(key.into(), Arc::new(bytes));
    }

    pub fn with(mut self, key: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(key, bytes);
        self
    }
}

impl SourceResolver for MemorySourceResolver {
    fn resolve(&self, source: &SourceRef) -> PrintcompResult<Box<dyn SourceImage>> {
        match source {
            SourceRef::Path(key) | SourceRef::Remote(key) => {
                let bytes = self.entries.get(key).ok_or_else(|| {
                    PrintcompError::invalid_input(format!("could not read image: unknown source '{key}'"))
                })?;
                open_bytes(bytes.clone(), source.looks_like_svg(), &self.limits)
            }
            SourceRef::Inline { bytes, .. } => {
                open_bytes(bytes.clone(), source.looks_like_svg(), &self.limits)
            }
        }
    }
}

fn open_bytes(
    bytes: Arc<Vec<u8>>,
    svg_hint: bool,
    limits: &SourceLimits,
) -> PrintcompResult<Box<dyn SourceImage>> {
    if svg_hint || SvgImage::sniff(&bytes) {
        return Ok(Box::new(SvgImage::from_bytes(&bytes, limits)?));
    }
    Ok(Box::new(EncodedImage::from_bytes(bytes, *limits)?))
}

fn remote_unsupported(url: &str) -> PrintcompError {
    PrintcompError::invalid_input(format!(
        "remote source '{url}' must be fetched before rendering"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
