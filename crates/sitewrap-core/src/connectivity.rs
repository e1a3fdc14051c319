//! One-shot network availability check used at launch.

use std::net::ToSocketAddrs;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Longest the launch waits on the resolver before calling the network down.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Answers whether the network looks usable right now.
pub trait Connectivity {
    /// Returns `false` only when the platform reports no usable network.
    ///
    /// Failures of the query itself count as available.
    fn is_available(&self) -> bool;
}

/// Fixed answer, for hosts that already know their network state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assume(pub bool);

impl Connectivity for Assume {
    fn is_available(&self) -> bool {
        self.0
    }
}

/// Resolves the target site's host with the system resolver.
///
/// A resolver failure, or no answer within the lookup timeout, is treated as
/// "no network". A target that cannot be parsed into a host is a failed query
/// and counts as available.
///
/// The lookup runs on a helper thread so a stalled resolver blocks the caller
/// for at most the timeout. A timed-out lookup thread is left to finish alone.
#[derive(Debug, Clone)]
pub struct SystemConnectivity {
    target: String,
    timeout: Duration,
}

impl SystemConnectivity {
    /// Probes reachability of the host behind `target_url`.
    pub fn for_url(target_url: impl Into<String>) -> Self {
        Self {
            target: target_url.into(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn probe_address(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.target).ok()?;
        let host = parsed.host_str()?;
        let port = parsed.port_or_known_default()?;
        Some(format!("{host}:{port}"))
    }
}

impl Connectivity for SystemConnectivity {
    fn is_available(&self) -> bool {
        let Some(address) = self.probe_address() else {
            tracing::warn!(
                "Cannot derive a probe address from {}; assuming online",
                self.target
            );
            return true;
        };

        let (sender, receiver) = mpsc::channel();
        let lookup = address.clone();
        let spawned = thread::Builder::new()
            .name("sitewrap-connectivity".to_string())
            .spawn(move || {
                let result = lookup
                    .to_socket_addrs()
                    .map(|mut addrs| addrs.next().is_some());
                let _ = sender.send(result);
            });
        if let Err(error) = spawned {
            tracing::warn!("Cannot start connectivity probe: {}; assuming online", error);
            return true;
        }

        match receiver.recv_timeout(self.timeout) {
            Ok(Ok(available)) => {
                tracing::debug!("Connectivity probe for {}: {}", address, available);
                available
            }
            Ok(Err(error)) => {
                tracing::info!("Connectivity probe for {} failed: {}", address, error);
                false
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::info!(
                    "Connectivity probe for {} timed out after {:?}",
                    address,
                    self.timeout
                );
                false
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::warn!("Connectivity probe for {} aborted; assuming online", address);
                true
            }
        }
    }
}

impl<C: Connectivity + ?Sized> Connectivity for &C {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_returns_fixed_answer() {
        assert!(Assume(true).is_available());
        assert!(!Assume(false).is_available());
    }

    #[test]
    fn unparsable_target_is_optimistic() {
        assert!(SystemConnectivity::for_url("not a url").is_available());
        assert!(SystemConnectivity::for_url("mailto:a@b.com").is_available());
    }

    #[test]
    fn probe_address_uses_scheme_default_port() {
        let probe = SystemConnectivity::for_url("https://shop.test/path");
        assert_eq!(probe.probe_address().as_deref(), Some("shop.test:443"));

        let probe = SystemConnectivity::for_url("http://127.0.0.1:8080/");
        assert_eq!(probe.probe_address().as_deref(), Some("127.0.0.1:8080"));
    }

    #[test]
    fn literal_ip_target_is_available() {
        assert!(SystemConnectivity::for_url("http://127.0.0.1:8080/").is_available());
    }

    #[test]
    fn unresolvable_host_is_offline() {
        // `.invalid` never resolves, with or without a network.
        let check = SystemConnectivity::for_url("https://nonexistent.invalid/")
            .with_timeout(Duration::from_secs(10));
        assert!(!check.is_available());
    }

    #[test]
    fn lookup_wait_is_bounded() {
        let check = SystemConnectivity::for_url("https://nonexistent.invalid/")
            .with_timeout(Duration::ZERO);
        let started = std::time::Instant::now();
        assert!(!check.is_available());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
