//! The wrapper's single screen.
//!
//! `Screen` owns the web surface for its whole lifetime and is the only place
//! host callbacks land: launch, navigation requests, load errors, lifecycle
//! signals, back presses, and bridge messages.

use crate::bridge::{AppInfo, BridgeAction, BridgeRequest};
use crate::capabilities::SurfaceCapabilities;
use crate::config::AppConfig;
use crate::connectivity::Connectivity;
use crate::error::Result;
use crate::fallback;
use crate::navigation::{NavigationDecision, NavigationPolicy};
use crate::state::ScreenState;
use crate::surface::{ExternalLauncher, LoadError, WebSurface};
use crate::util::compact_text;

/// Result of a back request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The surface stepped back; the host must not act on the event
    Consumed,
    /// The host should run its default back behavior
    Deferred,
}

/// Keys the host forwards from its raw key hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Back,
    Other,
}

/// Screen controller for one web surface.
pub struct Screen<S, L> {
    config: AppConfig,
    policy: NavigationPolicy,
    capabilities: SurfaceCapabilities,
    surface: S,
    launcher: L,
    state: ScreenState,
    configured: bool,
    paused: bool,
}

impl<S: WebSurface, L: ExternalLauncher> Screen<S, L> {
    pub fn new(config: AppConfig, surface: S, launcher: L) -> Self {
        Self {
            config,
            policy: NavigationPolicy::default(),
            capabilities: SurfaceCapabilities::WRAPPER,
            surface,
            launcher,
            state: ScreenState::Created,
            configured: false,
            paused: false,
        }
    }

    /// Replaces the built-in external-domain policy.
    #[must_use]
    pub fn with_policy(mut self, policy: NavigationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn state(&self) -> &ScreenState {
        &self.state
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Configures the surface and shows either the website or the fallback.
    pub fn launch(&mut self, connectivity: &dyn Connectivity) -> Result<()> {
        if self.state == ScreenState::Destroyed {
            tracing::warn!("Ignoring launch on a destroyed screen");
            return Ok(());
        }

        self.ensure_configured()?;

        if !connectivity.is_available() {
            tracing::info!("No connectivity at launch; showing offline page");
            return self.show_fallback();
        }

        let url = self.config.website_url.clone();
        tracing::info!("Loading {}", url);
        match self.surface.load_url(&url) {
            Ok(()) => {
                self.state = ScreenState::Loading { url };
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Failed to start loading {}: {}", url, error);
                self.show_fallback()
            }
        }
    }

    /// Handles an outgoing navigation request.
    ///
    /// Returns `true` when the navigation is consumed and must not load in the
    /// surface. Delegated URLs are consumed even if no app could open them.
    pub fn on_navigation(&mut self, url: &str) -> bool {
        if self.state == ScreenState::Destroyed {
            return true;
        }

        match self.policy.decide(url) {
            NavigationDecision::DelegateToExternalApp(app) => {
                tracing::debug!("Delegating {} to {:?}", compact_text(url), app);
                if let Err(error) = self.launcher.launch(app, url) {
                    tracing::warn!("No handler for {}: {}", compact_text(url), error);
                }
                true
            }
            NavigationDecision::LoadInSurface => {
                self.state = ScreenState::Loading {
                    url: url.to_string(),
                };
                false
            }
        }
    }

    /// Handles a load failure reported by the surface.
    ///
    /// Only top-level failures replace the page; subresource failures are
    /// logged and otherwise ignored.
    pub fn on_load_error(&mut self, error: &LoadError) -> Result<()> {
        if self.state == ScreenState::Destroyed {
            return Ok(());
        }
        if !error.main_frame {
            tracing::debug!(
                "Ignoring subresource failure for {}: {}",
                compact_text(&error.url),
                error.kind
            );
            return Ok(());
        }

        tracing::warn!(
            "Main frame failed for {}: {}",
            compact_text(&error.url),
            error.kind
        );
        self.show_fallback()
    }

    pub fn on_pause(&mut self) {
        if self.state == ScreenState::Destroyed || self.paused {
            return;
        }
        self.surface.pause();
        self.paused = true;
    }

    pub fn on_resume(&mut self) {
        if self.state == ScreenState::Destroyed || !self.paused {
            return;
        }
        self.surface.resume();
        self.paused = false;
    }

    /// Releases the surface. Every later callback is a no-op.
    pub fn on_destroy(&mut self) {
        if self.state == ScreenState::Destroyed {
            return;
        }
        self.surface.destroy();
        self.state = ScreenState::Destroyed;
        tracing::info!("Screen destroyed");
    }

    /// Steps back in the surface history, or defers to the host.
    pub fn go_back_or_defer(&mut self) -> BackOutcome {
        if self.state == ScreenState::Destroyed || !self.surface.can_go_back() {
            return BackOutcome::Deferred;
        }

        match self.surface.go_back() {
            Ok(()) => BackOutcome::Consumed,
            Err(error) => {
                tracing::warn!("Failed to step back in history: {}", error);
                BackOutcome::Deferred
            }
        }
    }

    /// Raw key hook entry point.
    pub fn on_key_down(&mut self, key: HostKey) -> BackOutcome {
        match key {
            HostKey::Back => self.go_back_or_defer(),
            HostKey::Other => BackOutcome::Deferred,
        }
    }

    /// Dedicated back-action hook entry point.
    pub fn on_back_pressed(&mut self) -> BackOutcome {
        self.go_back_or_defer()
    }

    /// Title the host window should show for a page title update.
    pub fn on_title_changed(&self, title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            self.config.app_name.clone()
        } else {
            title.to_string()
        }
    }

    /// Handles a message posted through the script bridge.
    pub fn on_bridge_message(&mut self, body: &str) -> BridgeAction {
        if self.state == ScreenState::Destroyed {
            return BridgeAction::Ignore;
        }

        let request = match BridgeRequest::parse(body) {
            Ok(request) => request,
            Err(error) => {
                tracing::warn!("{} ({})", error, compact_text(body));
                return BridgeAction::Ignore;
            }
        };

        match request {
            BridgeRequest::GetAppInfo => {
                match AppInfo::from_config(&self.config).reply_script() {
                    Ok(script) => BridgeAction::Evaluate(script),
                    Err(error) => {
                        tracing::warn!("Failed to encode app info: {}", error);
                        BridgeAction::Ignore
                    }
                }
            }
            BridgeRequest::ShowToast { message } => BridgeAction::Notify(message),
            BridgeRequest::CloseApp => BridgeAction::Close,
            BridgeRequest::HistoryChanged { index } => {
                self.surface.history_changed(index);
                BridgeAction::Ignore
            }
        }
    }

    fn ensure_configured(&mut self) -> Result<()> {
        if self.configured {
            return Ok(());
        }
        self.surface.configure(&self.capabilities)?;
        self.configured = true;
        tracing::debug!("Surface configured: {:?}", self.capabilities);
        Ok(())
    }

    fn show_fallback(&mut self) -> Result<()> {
        self.ensure_configured()?;
        self.surface.load_html(&fallback::render())?;
        self.state = ScreenState::ShowingFallback;
        Ok(())
    }
}
