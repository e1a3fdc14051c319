//! Host-facing seams: the embedded web surface and external app handoff.

use std::fmt;

use crate::capabilities::SurfaceCapabilities;
use crate::error::Result;
use crate::navigation::ExternalApp;

/// Embedded web rendering component owned by the screen.
pub trait WebSurface {
    /// Applies the capability table. Called once, before any load.
    fn configure(&mut self, capabilities: &SurfaceCapabilities) -> Result<()>;

    /// Starts a top-level navigation to `url`.
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Replaces the document with inline HTML that has no base URL.
    fn load_html(&mut self, html: &str) -> Result<()>;

    /// Whether the surface's history has an entry to step back to.
    fn can_go_back(&self) -> bool;

    /// Steps back one history entry.
    fn go_back(&mut self) -> Result<()>;

    /// Position of the current entry in the session history, as reported by
    /// the page. Surfaces that query their engine directly can ignore it.
    fn history_changed(&mut self, _index: usize) {}

    /// Suspends timers and media while the host is in the background.
    fn pause(&mut self);

    /// Resumes after [`WebSurface::pause`].
    fn resume(&mut self);

    /// Releases the engine. No other method is called afterwards.
    fn destroy(&mut self);
}

/// Hands delegated URLs to other applications.
pub trait ExternalLauncher {
    /// Opens `url` with the application matching `app`.
    fn launch(&mut self, app: ExternalApp, url: &str) -> Result<()>;
}

/// Engine-reported load failure category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    HostLookup,
    Connect,
    Timeout,
    UnsupportedScheme,
    Other(String),
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostLookup => f.write_str("unable to find the website"),
            Self::Connect => f.write_str("failed to connect to the website"),
            Self::Timeout => f.write_str("connection timeout"),
            Self::UnsupportedScheme => f.write_str("unsupported URL scheme"),
            Self::Other(description) => write!(f, "error loading page: {description}"),
        }
    }
}

/// A failed resource load observed by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub url: String,
    /// `true` for the outermost document, `false` for subresources.
    pub main_frame: bool,
    pub kind: LoadErrorKind,
}

impl LoadError {
    /// Failure of the top-level document.
    pub fn main_frame(url: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            url: url.into(),
            main_frame: true,
            kind,
        }
    }

    /// Failure of an image, script, iframe, or other subresource.
    pub fn subresource(url: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            url: url.into(),
            main_frame: false,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_kind_messages() {
        assert_eq!(
            LoadErrorKind::HostLookup.to_string(),
            "unable to find the website"
        );
        assert_eq!(
            LoadErrorKind::Other("net::ERR_FAILED".to_string()).to_string(),
            "error loading page: net::ERR_FAILED"
        );
    }

    #[test]
    fn load_error_constructors_set_frame() {
        assert!(LoadError::main_frame("https://shop.test", LoadErrorKind::Timeout).main_frame);
        assert!(!LoadError::subresource("https://cdn.test/a.png", LoadErrorKind::Connect).main_frame);
    }
}
