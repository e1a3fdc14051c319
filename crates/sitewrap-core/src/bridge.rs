//! Script bridge between the wrapped page and the native shell.
//!
//! Pages call `window.sitewrap.getAppInfo()`, `showToast(message)`, or
//! `closeApp()`. The injected script posts a JSON message over the engine's
//! IPC channel; the screen answers by evaluating a callback in the page.
//!
//! The same script reports the page's position in the session history. Each
//! entry is stamped with its index in `history.state`, so back/forward and
//! bfcache restores report the real position instead of a guess.

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Injected into every page before its own scripts run.
pub const INIT_SCRIPT: &str = r"(function () {
  if (window.sitewrap) { return; }
  function post(message) {
    if (window.ipc && window.ipc.postMessage) {
      window.ipc.postMessage(JSON.stringify(message));
    }
  }
  window.sitewrap = {
    onAppInfo: null,
    getAppInfo: function () { post({ cmd: 'getAppInfo' }); },
    showToast: function (message) { post({ cmd: 'showToast', message: String(message) }); },
    closeApp: function () { post({ cmd: 'closeApp' }); }
  };

  var KEY = '__sitewrapIndex';
  var push = history.pushState;
  var replace = history.replaceState;
  function indexOf(state) {
    return state && typeof state === 'object' && typeof state[KEY] === 'number' ? state[KEY] : -1;
  }
  function current() {
    var index = indexOf(history.state);
    return index >= 0 ? index : Math.max(history.length - 1, 0);
  }
  function stamped(state, index) {
    if (state === null || state === undefined) {
      var fresh = {};
      fresh[KEY] = index;
      return fresh;
    }
    if (typeof state === 'object' && !Array.isArray(state)) {
      var copy = Object.assign({}, state);
      copy[KEY] = index;
      return copy;
    }
    return state;
  }
  function settle() {
    var index = current();
    if (indexOf(history.state) < 0) {
      try { replace.call(history, stamped(history.state, index), ''); } catch (e) {}
    }
    post({ cmd: 'historyChanged', index: index });
  }
  history.pushState = function (state, title, url) {
    var result = push.call(history, stamped(state, current() + 1), title, url);
    settle();
    return result;
  };
  history.replaceState = function (state, title, url) {
    var result = replace.call(history, stamped(state, current()), title, url);
    settle();
    return result;
  };
  window.addEventListener('popstate', settle);
  window.addEventListener('hashchange', settle);
  window.addEventListener('pageshow', function (event) { if (event.persisted) { settle(); } });
  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', settle, { once: true });
  } else {
    settle();
  }
})();";

/// How long a page notice stays on screen.
pub const TOAST_DURATION_MS: u32 = 2000;

/// Message posted by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum BridgeRequest {
    GetAppInfo,
    ShowToast { message: String },
    CloseApp,
    /// Position of the current entry in the session history, 0-based
    HistoryChanged { index: usize },
}

impl BridgeRequest {
    /// Parses an IPC message body.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|error| Error::InvalidInput(format!("invalid bridge message: {error}")))
    }
}

/// Payload returned for `getAppInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_name: String,
    pub version: String,
    pub platform: String,
}

impl AppInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// Script that hands this payload to the page's `onAppInfo` callback.
    pub fn reply_script(&self) -> Result<String> {
        let payload = serde_json::to_string(self)?;
        Ok(format!(
            "window.sitewrap && typeof window.sitewrap.onAppInfo === 'function' && window.sitewrap.onAppInfo({payload});"
        ))
    }
}

/// Script that shows `message` as a transient notice over the page.
pub fn toast_script(message: &str) -> Result<String> {
    let text = serde_json::to_string(message)?;
    Ok(format!(
        "(function () {{
  var toast = document.createElement('div');
  toast.textContent = {text};
  toast.setAttribute('role', 'status');
  toast.style.cssText = 'position:fixed;left:50%;bottom:48px;transform:translateX(-50%);max-width:80%;padding:10px 18px;border-radius:18px;background:rgba(32,33,36,0.9);color:#fff;font:15px sans-serif;text-align:center;z-index:2147483647;pointer-events:none;';
  (document.body || document.documentElement).appendChild(toast);
  setTimeout(function () {{ toast.remove(); }}, {TOAST_DURATION_MS});
}})();"
    ))
}

/// What the host should do in response to a bridge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeAction {
    /// Evaluate this script in the page
    Evaluate(String),
    /// Show a short transient notice
    Notify(String),
    /// Close the screen
    Close,
    /// Nothing to do
    Ignore,
}
