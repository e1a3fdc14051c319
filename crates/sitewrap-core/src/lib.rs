//! sitewrap-core - Core library for Sitewrap
//!
//! This crate contains the platform-agnostic pieces of the website wrapper:
//! bundled config loading, the external-app navigation policy, the surface
//! capability table, the offline fallback page, and the screen controller
//! that ties them to host lifecycle events.

pub mod bridge;
pub mod capabilities;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fallback;
pub mod navigation;
pub mod screen;
pub mod state;
pub mod surface;
pub mod util;

pub use capabilities::{CookiePolicy, SurfaceCapabilities};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use navigation::{ExternalApp, NavigationDecision, NavigationPolicy};
pub use screen::{BackOutcome, Screen};
pub use surface::{ExternalLauncher, LoadError, LoadErrorKind, WebSurface};
