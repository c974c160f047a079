//! The ambient environment a context is carved out of.
//!
//! A [`HostEnvironment`] holds zero, one or two [`AmbientRoot`] snapshots plus
//! the live facilities those roots point at (the timer queue and the console
//! sink). Contexts read roots; they never write to them.

use std::collections::BTreeMap;

use crate::capability::{self, Policy, RootKind};
use crate::console::{ConsoleSink, host_console};
use crate::error::ContextError;
use crate::timers::TimerQueue;
use crate::types::{JsFunction, JsObject, JsObjectData, JsValue};

/// Snapshot of one root scope's own bindings.
#[derive(Debug, Clone)]
pub struct AmbientRoot {
    kind: RootKind,
    bindings: BTreeMap<String, JsValue>,
}

impl AmbientRoot {
    pub fn new(kind: RootKind) -> Self {
        Self {
            kind,
            bindings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    pub fn own_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn binding(&self, name: &str) -> Option<&JsValue> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    roots: Vec<AmbientRoot>,
    timers: TimerQueue,
    console: ConsoleSink,
}

impl HostEnvironment {
    /// A host with no roots. Contexts built from it hold only the fixed
    /// deny-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The host this build runs on: one standard root per compiled-in
    /// feature, sharing a timer queue and a console.
    pub fn detect() -> Self {
        let host = Self::new();
        #[cfg(feature = "server")]
        let host = {
            let root = host.standard_root(RootKind::Server);
            host.with_root(root)
        };
        #[cfg(feature = "browser")]
        let host = {
            let root = host.standard_root(RootKind::Browser);
            host.with_root(root)
        };
        host
    }

    /// Adds `root`, replacing any existing root of the same kind.
    #[must_use]
    pub fn with_root(mut self, root: AmbientRoot) -> Self {
        self.roots.retain(|r| r.kind() != root.kind());
        self.roots.push(root);
        self.roots.sort_by_key(AmbientRoot::kind);
        self
    }

    pub fn root(&self, kind: RootKind) -> Option<&AmbientRoot> {
        self.roots.iter().find(|r| r.kind() == kind)
    }

    pub fn roots(&self) -> impl Iterator<Item = &AmbientRoot> {
        self.roots.iter()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn console_sink(&self) -> &ConsoleSink {
        &self.console
    }

    /// Builds a root of `kind` populated from the capability table and bound
    /// to this host's timers and console.
    ///
    /// Language built-ins are not own enumerable properties of a real root,
    /// so protected and passthrough entries are left out of the snapshot
    /// (`Buffer` on the server root is the exception).
    pub fn standard_root(&self, kind: RootKind) -> AmbientRoot {
        let console = host_console(&self.console, host_object_constructor());
        let mut root = AmbientRoot::new(kind);
        for cap in capability::entries_for(kind) {
            let value = match cap.policy {
                Policy::Deny => opaque_handle(cap.name),
                Policy::Timer(op) => JsValue::Object(self.timers.host_function(op)),
                Policy::Console => JsValue::Object(console.clone()),
                Policy::Protected(ty) if ty.available_on(kind) && kind == RootKind::Server => {
                    opaque_handle(cap.name)
                }
                Policy::Protected(_) | Policy::Passthrough => continue,
            };
            root = root.with_binding(cap.name, value);
        }
        root
    }
}

// Stand-in for a host object the context must never see.
fn opaque_handle(name: &str) -> JsValue {
    JsValue::Object(JsObject::new(JsObjectData::with_class(name)))
}

/// The host `Function`: the code-from-string primitive.
pub fn host_function_constructor() -> JsValue {
    JsValue::Object(JsObject::function(JsFunction::constructor(
        "Function",
        1,
        |_this, _args| Err(ContextError::CodeGenerationDisallowed),
    )))
}

/// The host `Object`, whose `constructor` leads to the host `Function`.
pub fn host_object_constructor() -> JsValue {
    let object = JsObject::function(JsFunction::constructor("Object", 1, |_this, _args| {
        Ok(JsValue::Object(JsObject::plain()))
    }));
    object.set("constructor", host_function_constructor());
    JsValue::Object(object)
}

thread_local! {
    static DEFAULT_HOST: HostEnvironment = HostEnvironment::detect();
}

/// The default host for the calling thread.
///
/// Handles are cheap clones sharing the same timer queue and console sink.
pub fn current_host() -> HostEnvironment {
    DEFAULT_HOST.with(Clone::clone)
}
