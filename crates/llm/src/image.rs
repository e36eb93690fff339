//! Image references and their resolution into inlineable URLs.

use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::{Path, PathBuf};

/// Media type used when the extension does not identify one.
pub const DEFAULT_MIME: &str = "image/jpeg";

/// Prefixes that mark a reference as already sendable.
const REMOTE_PREFIXES: [&str; 2] = ["http://", "https://"];
const INLINE_PREFIX: &str = "data:";

/// A reference to an image attached to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A remote `http(s)` URL, passed through untouched.
    Remote(String),
    /// An inline `data:` URI.
    Inline(String),
    /// A local file that still has to be read.
    Local(PathBuf),
}

impl ImageRef {
    /// Classify a path or URL. Surrounding whitespace is ignored.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        if REMOTE_PREFIXES.iter().any(|p| reference.starts_with(p)) {
            Self::Remote(reference.to_owned())
        } else if reference.starts_with(INLINE_PREFIX) {
            Self::Inline(reference.to_owned())
        } else {
            Self::Local(PathBuf::from(reference))
        }
    }

    /// Resolve into a reference that can be sent to a provider.
    ///
    /// Remote and inline references are returned unchanged. Local files are
    /// read once and encoded as a base64 data URI.
    pub fn resolve(self) -> Result<Self> {
        match self {
            Self::Local(path) => inline(&path).map(Self::Inline),
            resolved => Ok(resolved),
        }
    }

    /// The URL form of a resolved reference; `None` for unresolved paths.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote(url) | Self::Inline(url) => Some(url),
            Self::Local(_) => None,
        }
    }

    /// Consume into the URL form, resolving local paths first.
    pub fn into_url(self) -> Result<String> {
        match self.resolve()? {
            Self::Remote(url) | Self::Inline(url) => Ok(url),
            Self::Local(path) => Err(Error::ImageNotFound(path)),
        }
    }
}

/// Resolve a path or URL straight into its URL form.
pub fn resolve(reference: &str) -> Result<String> {
    ImageRef::parse(reference).into_url()
}

fn inline(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::ImageNotFound(path.to_owned()));
    }

    let bytes = std::fs::read(path).map_err(|source| Error::ImageUnreadable {
        path: path.to_owned(),
        source,
    })?;
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME);
    tracing::trace!("inlined {} ({mime}, {} bytes)", path.display(), bytes.len());
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
