//! Engine navigation hook routing.
//!
//! The engine runs its navigation hook for every top-level load, including
//! the ones the screen starts itself. A host load is armed before it is
//! issued and passes the hook once without reaching the external-app policy.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

use std::sync::{Arc, Mutex, MutexGuard};

use sitewrap_core::NavigationPolicy;

/// What the navigation hook does with one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Load issued by the screen; allow it and tell nobody
    HostLoad,
    /// Page-initiated; forward it to the screen and allow or cancel
    Forward { allow: bool },
}

/// Shared between the surface, which arms host loads, and the engine hook.
#[derive(Debug, Clone)]
pub struct NavigationGate {
    policy: NavigationPolicy,
    host_load: Arc<Mutex<Option<String>>>,
}

impl NavigationGate {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self {
            policy,
            host_load: Arc::new(Mutex::new(None)),
        }
    }

    /// Marks `url` as the next load the screen issues.
    pub fn arm_host_load(&self, url: &str) {
        *self.slot() = Some(comparable(url));
    }

    /// Routes one navigation request from the engine hook.
    pub fn route(&self, url: &str) -> Routing {
        {
            let mut slot = self.slot();
            if slot.as_deref() == Some(comparable(url).as_str()) {
                *slot = None;
                return Routing::HostLoad;
            }
        }

        let consumed = self.policy.decide(url).consumes_navigation();
        Routing::Forward { allow: !consumed }
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.host_load
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// Engines report the normalized form of the URL they were asked to load.
fn comparable(url: &str) -> String {
    url::Url::parse(url).map_or_else(|_| url.to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn gate() -> NavigationGate {
        NavigationGate::new(NavigationPolicy::default())
    }

    #[test]
    fn configured_site_on_external_domain_loads_once() {
        let gate = gate();
        gate.arm_host_load("https://www.netflix.com");

        assert_eq!(gate.route("https://www.netflix.com/"), Routing::HostLoad);
        assert_eq!(
            gate.route("https://www.netflix.com/"),
            Routing::Forward { allow: false }
        );
    }

    #[test]
    fn page_navigation_is_forwarded_while_host_load_is_armed() {
        let gate = gate();
        gate.arm_host_load("https://dropbox.com/home");

        assert_eq!(
            gate.route("https://www.youtube.com/watch?v=1"),
            Routing::Forward { allow: false }
        );
        assert_eq!(
            gate.route("https://shop.test/cart"),
            Routing::Forward { allow: true }
        );
        assert_eq!(gate.route("https://dropbox.com/home"), Routing::HostLoad);
    }

    #[test]
    fn unarmed_gate_applies_policy() {
        let gate = gate();
        assert_eq!(
            gate.route("tel:+15551234567"),
            Routing::Forward { allow: false }
        );
        assert_eq!(
            gate.route("https://shop.test/"),
            Routing::Forward { allow: true }
        );
    }

    #[test]
    fn clones_share_the_armed_load() {
        let gate = gate();
        let hook = gate.clone();
        gate.arm_host_load("https://shop.test/");

        assert_eq!(hook.route("https://shop.test/"), Routing::HostLoad);
    }
}
