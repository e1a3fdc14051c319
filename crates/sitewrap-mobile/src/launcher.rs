//! External app handoff through the OS default handlers.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

use sitewrap_core::navigation::ExternalApp;
use sitewrap_core::{Error, ExternalLauncher, Result};

/// Opens delegated URLs with whatever the OS registered for them.
///
/// Browser-style URLs go to the app registered for the domain (or the default
/// browser); `tel:` and `mailto:` go to the dialer and mail handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ExternalLauncher for SystemLauncher {
    fn launch(&mut self, app: ExternalApp, url: &str) -> Result<()> {
        tracing::info!("Opening {} with the system {}", url, handler_name(app));
        open::that_detached(url)
            .map_err(|error| Error::Launch(format!("{} handler: {error}", handler_name(app))))
    }
}

const fn handler_name(app: ExternalApp) -> &'static str {
    match app {
        ExternalApp::Browser => "browser",
        ExternalApp::Dialer => "dialer",
        ExternalApp::Mailer => "mail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_names_match_app_kind() {
        assert_eq!(handler_name(ExternalApp::Browser), "browser");
        assert_eq!(handler_name(ExternalApp::Dialer), "dialer");
        assert_eq!(handler_name(ExternalApp::Mailer), "mail");
    }
}
