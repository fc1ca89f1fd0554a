//! Native transports the page can post to.
//!
//! Hosts expose themselves in one of three places:
//! - **React Native**: `window.ReactNativeWebView.postMessage(json)`
//! - **WebKit**: `window.webkit.messageHandlers.<name>.postMessage(json)`
//! - **Android**: `window.nativeBridge.postMessage(json)`
//!
//! [`HostBridges`] models those globals as injected handles and
//! [`Transport::probe`] picks the first one present, in that order.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use cardview_common::BridgeError;
use serde::{Deserialize, Serialize};

/// Default name of the WebKit message handler.
pub const DEFAULT_WEBKIT_HANDLER: &str = "nativeBridge";

/// Anything exposing a `postMessage(string)` entry point into the host.
pub trait HostHandle: Send + Sync {
    fn post_message(&self, message: &str) -> Result<(), BridgeError>;
}

impl<F> HostHandle for F
where
    F: Fn(&str) -> Result<(), BridgeError> + Send + Sync,
{
    fn post_message(&self, message: &str) -> Result<(), BridgeError> {
        self(message)
    }
}

/// The `window.webkit` namespace. Both levels may be missing.
#[derive(Clone, Default)]
pub struct WebkitNamespace {
    pub message_handlers: Option<HashMap<String, Arc<dyn HostHandle>>>,
}

impl WebkitNamespace {
    /// A namespace with a single registered handler.
    pub fn with_handler(name: impl Into<String>, handle: Arc<dyn HostHandle>) -> Self {
        let mut handlers = HashMap::new();
        handlers.insert(name.into(), handle);
        Self {
            message_handlers: Some(handlers),
        }
    }

    fn handler(&self, name: &str) -> Option<Arc<dyn HostHandle>> {
        self.message_handlers.as_ref()?.get(name).cloned()
    }
}

/// The host globals visible to the page. All absent by default, which is
/// what a plain browser looks like during development.
#[derive(Clone, Default)]
pub struct HostBridges {
    pub react_native: Option<Arc<dyn HostHandle>>,
    pub webkit: Option<WebkitNamespace>,
    pub android: Option<Arc<dyn HostHandle>>,
}

impl HostBridges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn react_native(handle: Arc<dyn HostHandle>) -> Self {
        Self {
            react_native: Some(handle),
            ..Default::default()
        }
    }

    pub fn webkit(handler_name: impl Into<String>, handle: Arc<dyn HostHandle>) -> Self {
        Self {
            webkit: Some(WebkitNamespace::with_handler(handler_name, handle)),
            ..Default::default()
        }
    }

    pub fn android(handle: Arc<dyn HostHandle>) -> Self {
        Self {
            android: Some(handle),
            ..Default::default()
        }
    }

    /// Build bridges exposing `handle` as the given transport kind.
    pub fn for_kind(kind: TransportKind, handle: Arc<dyn HostHandle>) -> Self {
        match kind {
            TransportKind::ReactNative => Self::react_native(handle),
            TransportKind::Webkit => Self::webkit(DEFAULT_WEBKIT_HANDLER, handle),
            TransportKind::Android => Self::android(handle),
            TransportKind::None => Self::none(),
        }
    }
}

impl std::fmt::Debug for HostBridges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridges")
            .field("react_native", &self.react_native.is_some())
            .field("webkit", &self.webkit.is_some())
            .field("android", &self.android.is_some())
            .finish()
    }
}

/// Which transport a send went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    ReactNative,
    Webkit,
    Android,
    None,
}

impl TransportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReactNative => "react-native",
            Self::Webkit => "webkit",
            Self::Android => "android",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "react-native" => Ok(Self::ReactNative),
            "webkit" | "ios" => Ok(Self::Webkit),
            "android" => Ok(Self::Android),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown transport '{other}' (expected react-native, webkit, android or none)"
            )),
        }
    }
}

/// The transport selected for one send.
#[derive(Clone)]
pub enum Transport {
    ReactNative(Arc<dyn HostHandle>),
    Webkit(Arc<dyn HostHandle>),
    Android(Arc<dyn HostHandle>),
    Absent,
}

impl Transport {
    /// Pick the highest-priority transport present in `bridges`.
    pub fn probe(bridges: &HostBridges, webkit_handler: &str) -> Self {
        if let Some(handle) = &bridges.react_native {
            return Self::ReactNative(Arc::clone(handle));
        }
        if let Some(handle) = bridges
            .webkit
            .as_ref()
            .and_then(|ns| ns.handler(webkit_handler))
        {
            return Self::Webkit(handle);
        }
        if let Some(handle) = &bridges.android {
            return Self::Android(Arc::clone(handle));
        }
        Self::Absent
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            Self::ReactNative(_) => TransportKind::ReactNative,
            Self::Webkit(_) => TransportKind::Webkit,
            Self::Android(_) => TransportKind::Android,
            Self::Absent => TransportKind::None,
        }
    }

    /// The host handle, if a native transport was found.
    pub fn handle(&self) -> Option<&Arc<dyn HostHandle>> {
        match self {
            Self::ReactNative(h) | Self::Webkit(h) | Self::Android(h) => Some(h),
            Self::Absent => None,
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transport({})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> Arc<dyn HostHandle> {
        Arc::new(|_: &str| -> Result<(), BridgeError> { Ok(()) })
    }

    #[test]
    fn empty_bridges_probe_absent() {
        let transport = Transport::probe(&HostBridges::none(), DEFAULT_WEBKIT_HANDLER);
        assert_eq!(transport.kind(), TransportKind::None);
        assert!(transport.handle().is_none());
    }

    #[test]
    fn react_native_wins_over_everything() {
        let bridges = HostBridges {
            react_native: Some(handle()),
            webkit: Some(WebkitNamespace::with_handler(DEFAULT_WEBKIT_HANDLER, handle())),
            android: Some(handle()),
        };
        let transport = Transport::probe(&bridges, DEFAULT_WEBKIT_HANDLER);
        assert_eq!(transport.kind(), TransportKind::ReactNative);
    }

    #[test]
    fn webkit_wins_over_android() {
        let bridges = HostBridges {
            react_native: None,
            webkit: Some(WebkitNamespace::with_handler(DEFAULT_WEBKIT_HANDLER, handle())),
            android: Some(handle()),
        };
        assert_eq!(
            Transport::probe(&bridges, DEFAULT_WEBKIT_HANDLER).kind(),
            TransportKind::Webkit
        );
    }

    #[test]
    fn webkit_namespace_without_handler_falls_through() {
        let bridges = HostBridges {
            react_native: None,
            webkit: Some(WebkitNamespace::default()),
            android: Some(handle()),
        };
        assert_eq!(
            Transport::probe(&bridges, DEFAULT_WEBKIT_HANDLER).kind(),
            TransportKind::Android
        );
    }

    #[test]
    fn webkit_handler_name_must_match() {
        let bridges = HostBridges::webkit("otherBridge", handle());
        assert_eq!(
            Transport::probe(&bridges, DEFAULT_WEBKIT_HANDLER).kind(),
            TransportKind::None
        );
        assert_eq!(
            Transport::probe(&bridges, "otherBridge").kind(),
            TransportKind::Webkit
        );
    }

    #[test]
    fn for_kind_places_handle() {
        for kind in [
            TransportKind::ReactNative,
            TransportKind::Webkit,
            TransportKind::Android,
            TransportKind::None,
        ] {
            let bridges = HostBridges::for_kind(kind, handle());
            assert_eq!(Transport::probe(&bridges, DEFAULT_WEBKIT_HANDLER).kind(), kind);
        }
    }

    #[test]
    fn transport_kind_parses() {
        assert_eq!("react-native".parse::<TransportKind>(), Ok(TransportKind::ReactNative));
        assert_eq!("ios".parse::<TransportKind>(), Ok(TransportKind::Webkit));
        assert_eq!("none".parse::<TransportKind>(), Ok(TransportKind::None));
        assert!("carrier-pigeon".parse::<TransportKind>().is_err());
    }

    #[test]
    fn debug_shows_presence_only() {
        let bridges = HostBridges::android(handle());
        assert_eq!(
            format!("{bridges:?}"),
            "HostBridges { react_native: false, webkit: false, android: true }"
        );
    }
}
