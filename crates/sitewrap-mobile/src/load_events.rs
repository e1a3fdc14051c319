//! Main-frame failure detection from page-load notifications.
//!
//! wry reports when a top-level document starts and finishes but has no error
//! callback. Two signals stand in for one:
//! - WebView2 and Android WebView commit a `chrome-error://` page for a failed
//!   main-frame load, so a finished load of that URL is a failure.
//! - A load that starts and never finishes within [`MAIN_FRAME_LOAD_TIMEOUT`]
//!   is a failure on every engine.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

use std::time::{Duration, Instant};

use sitewrap_core::{LoadError, LoadErrorKind};

const CHROMIUM_ERROR_PREFIX: &str = "chrome-error://";

/// How long a top-level load may stay unfinished before it counts as failed.
pub const MAIN_FRAME_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the main-frame failure a finished load represents, if any.
pub fn main_frame_failure(url: &str) -> Option<LoadError> {
    url.to_ascii_lowercase()
        .starts_with(CHROMIUM_ERROR_PREFIX)
        .then(|| LoadError::main_frame(url, LoadErrorKind::Other("engine error page".to_string())))
}

/// Tracks the top-level load in flight.
///
/// Redirects finish under a different URL than they started with, so any
/// finish settles the pending load.
#[derive(Debug, Clone)]
pub struct LoadWatch {
    timeout: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for LoadWatch {
    fn default() -> Self {
        Self::with_timeout(MAIN_FRAME_LOAD_TIMEOUT)
    }
}

impl LoadWatch {
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: None,
        }
    }

    pub fn started(&mut self, url: &str, now: Instant) {
        self.pending = Some((url.to_string(), now + self.timeout));
    }

    pub fn finished(&mut self) {
        self.pending = None;
    }

    /// When the event loop must wake up to check the pending load.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Takes the pending load as a timeout failure once its deadline passed.
    pub fn expire(&mut self, now: Instant) -> Option<LoadError> {
        if self.deadline()? > now {
            return None;
        }
        let (url, _) = self.pending.take()?;
        Some(LoadError::main_frame(url, LoadErrorKind::Timeout))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn regular_pages_are_not_failures() {
        assert_eq!(main_frame_failure("https://shop.test/"), None);
        assert_eq!(main_frame_failure("about:blank"), None);
    }

    #[test]
    fn chromium_error_page_is_a_main_frame_failure() {
        let failure = main_frame_failure("chrome-error://chromewebdata/").unwrap();
        assert!(failure.main_frame);
        assert_eq!(
            failure.kind,
            LoadErrorKind::Other("engine error page".to_string())
        );
    }

    #[test]
    fn load_that_never_finishes_times_out() {
        let start = Instant::now();
        let mut watch = LoadWatch::with_timeout(Duration::from_secs(5));
        watch.started("https://shop.test/", start);

        assert_eq!(watch.deadline(), Some(start + Duration::from_secs(5)));
        assert_eq!(watch.expire(start + Duration::from_secs(4)), None);
        assert_eq!(
            watch.expire(start + Duration::from_secs(5)),
            Some(LoadError::main_frame("https://shop.test/", LoadErrorKind::Timeout))
        );
        assert_eq!(watch.deadline(), None);
        assert_eq!(watch.expire(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn finished_load_is_not_reported() {
        let start = Instant::now();
        let mut watch = LoadWatch::with_timeout(Duration::from_secs(5));
        watch.started("http://shop.test/", start);
        watch.finished();

        assert_eq!(watch.deadline(), None);
        assert_eq!(watch.expire(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn new_start_rearms_the_deadline() {
        let start = Instant::now();
        let mut watch = LoadWatch::with_timeout(Duration::from_secs(5));
        watch.started("https://shop.test/", start);
        watch.started("https://shop.test/cart", start + Duration::from_secs(3));

        assert_eq!(watch.expire(start + Duration::from_secs(6)), None);
        assert_eq!(
            watch.expire(start + Duration::from_secs(8)).map(|error| error.url),
            Some("https://shop.test/cart".to_string())
        );
    }
}
