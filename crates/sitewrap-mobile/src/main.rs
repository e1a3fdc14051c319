//! Sitewrap Mobile Application
//!
//! Shell entrypoint that wraps the bundled website in a single web view screen.

#[cfg(any(feature = "native", test))]
mod bundled;
#[cfg(any(feature = "native", test))]
mod history;
#[cfg(any(feature = "native", test))]
mod launcher;
#[cfg(any(feature = "native", test))]
mod load_events;
#[cfg(any(feature = "native", test))]
mod navigation_gate;
#[cfg(feature = "native")]
mod shell;

#[cfg(feature = "native")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sitewrap=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Sitewrap shell...");

    // Cookie acceptance is process-wide and must be settled before any web
    // view exists.
    sitewrap_core::capabilities::install_cookie_policy(
        sitewrap_core::SurfaceCapabilities::WRAPPER.cookies,
    );

    let config = bundled::load_bundled_config();
    if let Err(error) = shell::run(config) {
        tracing::error!("Shell failed to start: {}", error);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    println!(
        "sitewrap-mobile needs a platform web engine. Try: cargo run -p sitewrap-mobile --features native"
    );
}
