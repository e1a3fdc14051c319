//! Navigation policy: which URLs leave the embedded surface.
//!
//! Links to well-known social, media, maps, and store sites are handed to the
//! platform so the native app (or the system browser) opens them. `tel:` and
//! `mailto:` links go to the dialer and the mail composer. Everything else
//! loads inside the surface.

/// Domain fragments whose links open outside the surface.
///
/// Matched case-insensitively anywhere in the URL.
pub const EXTERNAL_DOMAIN_FRAGMENTS: &[&str] = &[
    "facebook.com",
    "fb.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "whatsapp.com",
    "wa.me",
    "linkedin.com",
    "youtube.com",
    "youtu.be",
    "maps.google.com",
    "goo.gl/maps",
    "play.google.com",
    "apps.apple.com",
];

const DIALER_PREFIX: &str = "tel:";
const MAILER_PREFIX: &str = "mailto:";

/// Platform application a delegated URL is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalApp {
    /// Generic view action: native app for the domain, or the system browser
    Browser,
    /// Phone dialer, pre-filled from a `tel:` URL
    Dialer,
    /// Mail composer, pre-filled from a `mailto:` URL
    Mailer,
}

/// Outcome of the policy for one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the embedded surface load the URL
    LoadInSurface,
    /// Consume the navigation and hand the URL to another app
    DelegateToExternalApp(ExternalApp),
}

impl NavigationDecision {
    /// Whether the host should cancel the in-surface navigation.
    pub const fn consumes_navigation(self) -> bool {
        matches!(self, Self::DelegateToExternalApp(_))
    }
}

/// Fragment allow-list plus the fixed scheme rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    fragments: Vec<String>,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self::with_fragments(EXTERNAL_DOMAIN_FRAGMENTS.iter().copied())
    }
}

impl NavigationPolicy {
    /// Builds a policy from an explicit fragment list.
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|fragment| fragment.as_ref().trim().to_lowercase())
                .filter(|fragment| !fragment.is_empty())
                .collect(),
        }
    }

    /// Domain fragments this policy delegates.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Classifies a navigation request.
    ///
    /// The fragment check runs before the scheme checks, so a `tel:` or
    /// `mailto:` URL containing a listed fragment is delegated to the browser.
    pub fn decide(&self, url: &str) -> NavigationDecision {
        let lower = url.to_lowercase();

        if self
            .fragments
            .iter()
            .any(|fragment| lower.contains(fragment.as_str()))
        {
            return NavigationDecision::DelegateToExternalApp(ExternalApp::Browser);
        }

        if url.starts_with(DIALER_PREFIX) {
            return NavigationDecision::DelegateToExternalApp(ExternalApp::Dialer);
        }

        if url.starts_with(MAILER_PREFIX) {
            return NavigationDecision::DelegateToExternalApp(ExternalApp::Mailer);
        }

        NavigationDecision::LoadInSurface
    }
}

/// Classifies a URL with the built-in allow-list.
pub fn decide(url: &str) -> NavigationDecision {
    NavigationPolicy::default().decide(url)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BROWSER: NavigationDecision =
        NavigationDecision::DelegateToExternalApp(ExternalApp::Browser);

    #[test]
    fn every_listed_fragment_is_delegated() {
        for fragment in EXTERNAL_DOMAIN_FRAGMENTS {
            let url = format!("https://www.{fragment}/some/path");
            assert_eq!(decide(&url), BROWSER, "{url}");
        }
    }

    #[test]
    fn fragment_match_is_case_insensitive() {
        assert_eq!(decide("HTTPS://WWW.YOUTUBE.COM/x"), BROWSER);
        assert_eq!(decide("https://Goo.gl/Maps/abc"), BROWSER);
    }

    #[test]
    fn fragment_matches_anywhere_in_url() {
        assert_eq!(
            decide("https://shop.test/share?to=https://wa.me/15551234567"),
            BROWSER
        );
    }

    #[test]
    fn tel_goes_to_dialer() {
        assert_eq!(
            decide("tel:+15551234567"),
            NavigationDecision::DelegateToExternalApp(ExternalApp::Dialer)
        );
    }

    #[test]
    fn mailto_goes_to_mailer() {
        assert_eq!(
            decide("mailto:a@b.com"),
            NavigationDecision::DelegateToExternalApp(ExternalApp::Mailer)
        );
    }

    #[test]
    fn fragment_check_runs_before_scheme_checks() {
        assert_eq!(decide("mailto:support@facebook.com"), BROWSER);
        assert_eq!(decide("mailto:someone@box.com"), BROWSER);
    }

    #[test]
    fn scheme_prefix_is_literal() {
        assert_eq!(decide("TEL:+15551234567"), NavigationDecision::LoadInSurface);
    }

    #[test]
    fn plain_pages_load_in_surface() {
        assert_eq!(
            decide("https://example.com/page"),
            NavigationDecision::LoadInSurface
        );
        assert!(!decide("https://example.com/page").consumes_navigation());
    }

    #[test]
    fn custom_fragments_extend_as_data() {
        let policy = NavigationPolicy::with_fragments([" TikTok.com ", ""]);
        assert_eq!(policy.fragments().to_vec(), vec!["tiktok.com".to_string()]);
        assert_eq!(policy.decide("https://www.tiktok.com/@shop"), BROWSER);
        assert_eq!(
            policy.decide("https://www.youtube.com/watch"),
            NavigationDecision::LoadInSurface
        );
    }
}
