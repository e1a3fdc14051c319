//! wry/tao host for the wrapper screen.
//!
//! Engine callbacks never touch the screen directly: they post a
//! [`ShellEvent`] to the event loop, which owns the [`Screen`] and runs every
//! hook on the UI thread.

use std::rc::Rc;
use std::time::Instant;

use sitewrap_core::bridge::{toast_script, BridgeAction, INIT_SCRIPT};
use sitewrap_core::capabilities::installed_cookie_policy;
use sitewrap_core::connectivity::SystemConnectivity;
use sitewrap_core::screen::HostKey;
use sitewrap_core::{
    AppConfig, BackOutcome, Error, LoadError, NavigationPolicy, Result, Screen,
    SurfaceCapabilities, WebSurface,
};
use tao::dpi::LogicalSize;
use tao::event::{ElementState, Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::keyboard::{Key, ModifiersState};
use tao::window::{Window, WindowBuilder};
#[cfg(target_os = "linux")]
use wry::WebViewBuilderExtUnix;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::history::PageHistory;
use crate::launcher::SystemLauncher;
use crate::load_events::{main_frame_failure, LoadWatch};
use crate::navigation_gate::{NavigationGate, Routing};

const DEFAULT_WINDOW_WIDTH: f64 = 420.0;
const DEFAULT_WINDOW_HEIGHT: f64 = 860.0;

/// Engine notifications forwarded to the event loop.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    Navigation(String),
    PageStarted(String),
    PageLoaded(String),
    TitleChanged(String),
    Bridge(String),
}

/// [`WebSurface`] backed by a wry web view inside a tao window.
///
/// The web view is built by [`WebSurface::configure`] so the capability table
/// is applied exactly once, at construction time.
pub struct WrySurface {
    window: Rc<Window>,
    proxy: EventLoopProxy<ShellEvent>,
    gate: NavigationGate,
    user_agent: String,
    webview: Option<WebView>,
    history: PageHistory,
}

impl WrySurface {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<ShellEvent>,
        policy: NavigationPolicy,
        config: &AppConfig,
    ) -> Self {
        Self {
            window,
            proxy,
            gate: NavigationGate::new(policy),
            user_agent: compose_user_agent(config),
            webview: None,
            history: PageHistory::default(),
        }
    }

    /// Runs a script in the current page.
    pub fn evaluate(&self, script: &str) -> Result<()> {
        self.webview()?
            .evaluate_script(script)
            .map_err(|error| Error::Surface(format!("evaluate_script failed: {error}")))
    }

    fn webview(&self) -> Result<&WebView> {
        self.webview
            .as_ref()
            .ok_or_else(|| Error::Surface("web view is not built".to_string()))
    }

    fn build_webview(&self, capabilities: &SurfaceCapabilities) -> Result<WebView> {
        warn_unenforced(capabilities);

        let navigation_proxy = self.proxy.clone();
        let navigation_gate = self.gate.clone();
        let page_load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let ipc_proxy = self.proxy.clone();

        let builder = WebViewBuilder::new()
            .with_user_agent(&self.user_agent)
            .with_autoplay(capabilities.autoplay_without_gesture)
            .with_devtools(cfg!(debug_assertions))
            .with_incognito(false)
            .with_initialization_script(INIT_SCRIPT)
            .with_initialization_script(&viewport_script(capabilities))
            .with_navigation_handler(move |url: String| match navigation_gate.route(&url) {
                Routing::HostLoad => true,
                Routing::Forward { allow } => {
                    let _ = navigation_proxy.send_event(ShellEvent::Navigation(url));
                    allow
                }
            })
            .with_on_page_load_handler(move |event, url| {
                let event = match event {
                    PageLoadEvent::Started => ShellEvent::PageStarted(url),
                    PageLoadEvent::Finished => ShellEvent::PageLoaded(url),
                };
                let _ = page_load_proxy.send_event(event);
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(ShellEvent::TitleChanged(title));
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let _ = ipc_proxy.send_event(ShellEvent::Bridge(request.body().clone()));
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or_else(|| Error::Surface("window has no GTK container".to_string()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build(self.window.as_ref());

        webview.map_err(|error| Error::Surface(format!("Failed to create web view: {error}")))
    }
}

impl WebSurface for WrySurface {
    fn configure(&mut self, capabilities: &SurfaceCapabilities) -> Result<()> {
        if self.webview.is_some() {
            return Err(Error::Surface("web view is already configured".to_string()));
        }
        self.webview = Some(self.build_webview(capabilities)?);
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.gate.arm_host_load(url);
        self.webview()?
            .load_url(url)
            .map_err(|error| Error::Surface(format!("load_url failed: {error}")))
    }

    fn load_html(&mut self, html: &str) -> Result<()> {
        self.webview()?
            .load_html(html)
            .map_err(|error| Error::Surface(format!("load_html failed: {error}")))
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn go_back(&mut self) -> Result<()> {
        self.evaluate("history.back();")?;
        self.history.step_back();
        Ok(())
    }

    fn history_changed(&mut self, index: usize) {
        self.history.report(index);
    }

    fn pause(&mut self) {
        if let Some(webview) = &self.webview {
            if let Err(error) = webview.set_visible(false) {
                tracing::warn!("Failed to hide web view: {}", error);
            }
        }
    }

    fn resume(&mut self) {
        if let Some(webview) = &self.webview {
            if let Err(error) = webview.set_visible(true) {
                tracing::warn!("Failed to show web view: {}", error);
            }
        }
    }

    fn destroy(&mut self) {
        self.webview = None;
        self.history.reset();
    }
}

/// Builds the window and runs the screen until the host dismisses it.
pub fn run(config: AppConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title(&config.app_name)
        .with_inner_size(LogicalSize::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT))
        .build(&event_loop)?;
    let window = Rc::new(window);

    let connectivity = SystemConnectivity::for_url(config.website_url.clone());
    let surface = WrySurface::new(
        Rc::clone(&window),
        event_loop.create_proxy(),
        NavigationPolicy::default(),
        &config,
    );
    let mut screen = Screen::new(config, surface, SystemLauncher);
    screen.launch(&connectivity)?;

    let mut modifiers = ModifiersState::empty();
    let mut load_watch = LoadWatch::default();

    event_loop.run(move |event, _, control_flow| {
        let mut exit = false;

        match event {
            Event::UserEvent(ShellEvent::Navigation(url)) => {
                screen.on_navigation(&url);
            }
            Event::UserEvent(ShellEvent::PageStarted(url)) => {
                load_watch.started(&url, Instant::now());
            }
            Event::UserEvent(ShellEvent::PageLoaded(url)) => {
                load_watch.finished();
                if let Some(failure) = main_frame_failure(&url) {
                    show_load_failure(&mut screen, &failure);
                }
            }
            Event::UserEvent(ShellEvent::TitleChanged(title)) => {
                window.set_title(&screen.on_title_changed(&title));
            }
            Event::UserEvent(ShellEvent::Bridge(body)) => match screen.on_bridge_message(&body) {
                BridgeAction::Evaluate(script) => {
                    if let Err(error) = screen.surface().evaluate(&script) {
                        tracing::warn!("Failed to answer bridge message: {}", error);
                    }
                }
                BridgeAction::Notify(message) => {
                    let shown = toast_script(&message)
                        .and_then(|script| screen.surface().evaluate(&script));
                    if let Err(error) = shown {
                        tracing::warn!("Failed to show page notice: {}", error);
                    }
                }
                BridgeAction::Close => {
                    screen.on_destroy();
                    exit = true;
                }
                BridgeAction::Ignore => {}
            },
            Event::Suspended => screen.on_pause(),
            Event::Resumed => screen.on_resume(),
            Event::WindowEvent {
                event: WindowEvent::ModifiersChanged(state),
                ..
            } => {
                modifiers = state;
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } if event.state == ElementState::Pressed => {
                let outcome = match event.logical_key {
                    Key::GoBack | Key::BrowserBack => Some(screen.on_key_down(HostKey::Back)),
                    Key::ArrowLeft if modifiers.alt_key() => Some(screen.on_back_pressed()),
                    _ => None,
                };
                if outcome == Some(BackOutcome::Deferred) {
                    tracing::info!("Back with empty history; dismissing screen");
                    screen.on_destroy();
                    exit = true;
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                screen.on_destroy();
                exit = true;
            }
            _ => {}
        }

        if let Some(failure) = load_watch.expire(Instant::now()) {
            show_load_failure(&mut screen, &failure);
        }

        *control_flow = if exit {
            ControlFlow::Exit
        } else {
            load_watch
                .deadline()
                .map_or(ControlFlow::Wait, ControlFlow::WaitUntil)
        };
    });
}

fn show_load_failure(screen: &mut Screen<WrySurface, SystemLauncher>, failure: &LoadError) {
    if let Err(error) = screen.on_load_error(failure) {
        tracing::error!("Failed to show offline page: {}", error);
    }
}

fn compose_user_agent(config: &AppConfig) -> String {
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/605.1.15 (KHTML, like Gecko) {}",
        std::env::consts::OS,
        config.user_agent_suffix()
    )
}

fn viewport_script(capabilities: &SurfaceCapabilities) -> String {
    format!(
        "document.addEventListener('DOMContentLoaded', function () {{
  if (document.querySelector('meta[name=viewport]')) {{ return; }}
  var meta = document.createElement('meta');
  meta.name = 'viewport';
  meta.content = '{}';
  document.head.appendChild(meta);
}}, {{ once: true }});",
        capabilities.viewport_meta()
    )
}

// wry has no switches for these; the engine defaults apply.
fn warn_unenforced(capabilities: &SurfaceCapabilities) {
    if !capabilities.javascript {
        tracing::warn!("Script execution cannot be disabled by the wry backend");
    }
    if capabilities.zoom_controls_visible {
        tracing::warn!("Visible zoom controls are not supported by the wry backend");
    }
    let cookies = installed_cookie_policy().unwrap_or(capabilities.cookies);
    if !cookies.accept_cookies || !cookies.accept_third_party_cookies {
        tracing::warn!(
            "Cookie policy {:?} is not enforced by the wry backend; engine defaults apply",
            cookies
        );
    }
    tracing::debug!(
        "Engine defaults cover storage, file/content access, mixed content ({:?}), cache ({:?}), popups, encoding ({})",
        capabilities.mixed_content,
        capabilities.cache_mode,
        capabilities.default_text_encoding
    );
}
