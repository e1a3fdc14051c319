//! Fixed capability table for the embedded web surface.
//!
//! The wrapper enables one set of engine features, once, when the surface is
//! built. Keeping the set in a single value makes it easy to audit exactly
//! what the wrapped site is allowed to do.

use std::sync::OnceLock;

/// How the engine treats plain-HTTP subresources on HTTPS pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixedContentMode {
    /// Load insecure content unconditionally
    AlwaysAllow,
    /// Block all insecure content
    NeverAllow,
}

/// Engine cache behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Use the engine's default HTTP caching rules
    Default,
    /// Bypass the cache for every request
    NoCache,
}

/// Every capability toggle applied to the surface at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SurfaceCapabilities {
    pub javascript: bool,
    pub dom_storage: bool,
    pub database_storage: bool,
    pub wide_viewport: bool,
    pub pinch_zoom: bool,
    pub zoom_controls_visible: bool,
    pub file_access: bool,
    pub content_access: bool,
    pub mixed_content: MixedContentMode,
    pub cache_mode: CacheMode,
    pub scripted_popups: bool,
    pub autoplay_without_gesture: bool,
    pub default_text_encoding: &'static str,
    pub cookies: CookiePolicy,
}

impl SurfaceCapabilities {
    /// The wrapper's capability set.
    pub const WRAPPER: Self = Self {
        javascript: true,
        dom_storage: true,
        database_storage: true,
        wide_viewport: true,
        pinch_zoom: true,
        zoom_controls_visible: false,
        file_access: true,
        content_access: true,
        mixed_content: MixedContentMode::AlwaysAllow,
        cache_mode: CacheMode::Default,
        scripted_popups: true,
        autoplay_without_gesture: true,
        default_text_encoding: "utf-8",
        cookies: CookiePolicy::ACCEPT_ALL,
    };

    /// Viewport meta content injected into pages for wide-viewport layout.
    pub const fn viewport_meta(&self) -> &'static str {
        match (self.wide_viewport, self.pinch_zoom) {
            (true, true) => "width=device-width, initial-scale=1",
            (true, false) => "width=device-width, initial-scale=1, user-scalable=no",
            (false, true) => "initial-scale=1",
            (false, false) => "initial-scale=1, user-scalable=no",
        }
    }
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self::WRAPPER
    }
}

/// Process-wide cookie acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub accept_cookies: bool,
    pub accept_third_party_cookies: bool,
}

impl CookiePolicy {
    /// First- and third-party cookies accepted.
    pub const ACCEPT_ALL: Self = Self {
        accept_cookies: true,
        accept_third_party_cookies: true,
    };
}

static COOKIE_POLICY: OnceLock<CookiePolicy> = OnceLock::new();

/// Installs the process-wide cookie policy.
///
/// Must run once during startup, before the surface is built. The first call
/// wins; later calls return the policy that is already in effect.
pub fn install_cookie_policy(policy: CookiePolicy) -> CookiePolicy {
    let installed = *COOKIE_POLICY.get_or_init(|| {
        tracing::info!(
            "Installing cookie policy (first-party: {}, third-party: {})",
            policy.accept_cookies,
            policy.accept_third_party_cookies
        );
        policy
    });
    if installed != policy {
        tracing::warn!("Cookie policy already installed; ignoring {:?}", policy);
    }
    installed
}

/// Returns the installed cookie policy, if startup already installed one.
pub fn installed_cookie_policy() -> Option<CookiePolicy> {
    COOKIE_POLICY.get().copied()
}
