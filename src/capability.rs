//! The explicit, versioned capability table.
//!
//! Each entry names an ambient binding a host root exposes and the policy
//! applied when a context is built from that root. The table is the single
//! auditable statement of what evaluated code may see; root snapshots can
//! add further names, but those are only ever denied.

use std::fmt;

use crate::builtins::BuiltinType;
use crate::timers::{TimerKind, TimerOp};

/// Bumped whenever an entry is added, removed or changes policy.
pub const TABLE_VERSION: u32 = 1;

/// Names set to `undefined` in every context, whichever roots are present.
pub const ALWAYS_DENIED: &[&str] = &[
    "global",
    "globalThis",
    "process",
    "module",
    "require",
    "document",
    "window",
    "Window",
    "eval",
    "Function",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKind {
    /// Node-style `global`.
    Server,
    /// Browser-style `window`.
    Browser,
}

impl RootKind {
    pub const ALL: [RootKind; 2] = [RootKind::Server, RootKind::Browser];

    pub const fn name(self) -> &'static str {
        match self {
            RootKind::Server => "server",
            RootKind::Browser => "browser",
        }
    }

    /// Whether support for this root was compiled in.
    pub const fn is_compiled_in(self) -> bool {
        match self {
            RootKind::Server => cfg!(feature = "server"),
            RootKind::Browser => cfg!(feature = "browser"),
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Bound to `undefined`.
    Deny,
    /// Re-introduced as a restricted wrapper around the host timer.
    Timer(TimerOp),
    /// Re-introduced as a deep clone with its constructor chain severed.
    Console,
    /// Re-introduced as a protected constructor from the built-in registry.
    Protected(BuiltinType),
    /// Left out of the context; the evaluator's own intrinsic is used.
    Passthrough,
}

impl Policy {
    pub const fn label(self) -> &'static str {
        match self {
            Policy::Deny => "deny",
            Policy::Timer(_) => "timer",
            Policy::Console => "console",
            Policy::Protected(_) => "protected",
            Policy::Passthrough => "passthrough",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub root: RootKind,
    pub policy: Policy,
}

macro_rules! table {
    ($($root:ident $name:literal => $policy:expr;)*) => {
        &[$(Capability { name: $name, root: RootKind::$root, policy: $policy },)*]
    };
}

use Policy::{Console, Deny, Passthrough, Protected, Timer};
use TimerOp::{Cancel, Schedule};

pub static CAPABILITY_TABLE: &[Capability] = table! {
    // Server root: the enumerable own properties of a Node global.
    Server "global" => Deny;
    Server "globalThis" => Deny;
    Server "process" => Deny;
    Server "Buffer" => Protected(BuiltinType::Buffer);
    Server "console" => Console;
    Server "setTimeout" => Timer(Schedule(TimerKind::Timeout));
    Server "setInterval" => Timer(Schedule(TimerKind::Interval));
    Server "setImmediate" => Timer(Schedule(TimerKind::Immediate));
    Server "clearTimeout" => Timer(Cancel(TimerKind::Timeout));
    Server "clearInterval" => Timer(Cancel(TimerKind::Interval));
    Server "clearImmediate" => Timer(Cancel(TimerKind::Immediate));
    Server "queueMicrotask" => Deny;
    Server "structuredClone" => Deny;
    Server "atob" => Deny;
    Server "btoa" => Deny;
    Server "performance" => Deny;
    Server "fetch" => Deny;
    Server "crypto" => Deny;
    Server "navigator" => Deny;
    Server "URL" => Deny;
    Server "URLSearchParams" => Deny;
    Server "TextEncoder" => Deny;
    Server "TextDecoder" => Deny;
    Server "AbortController" => Deny;
    Server "AbortSignal" => Deny;
    Server "EventTarget" => Deny;
    Server "Event" => Deny;
    Server "MessageChannel" => Deny;
    Server "MessagePort" => Deny;
    Server "BroadcastChannel" => Deny;
    Server "WebAssembly" => Deny;
    Server "SharedArrayBuffer" => Passthrough;
    Server "NaN" => Passthrough;
    Server "Infinity" => Passthrough;
    Server "undefined" => Passthrough;
    Server "isNaN" => Passthrough;
    Server "isFinite" => Passthrough;
    Server "parseInt" => Passthrough;
    Server "parseFloat" => Passthrough;

    // Browser root: the enumerable own properties of a window.
    Browser "window" => Deny;
    Browser "self" => Deny;
    Browser "globalThis" => Deny;
    Browser "document" => Deny;
    Browser "location" => Deny;
    Browser "history" => Deny;
    Browser "navigator" => Deny;
    Browser "frames" => Deny;
    Browser "parent" => Deny;
    Browser "top" => Deny;
    Browser "opener" => Deny;
    Browser "localStorage" => Deny;
    Browser "sessionStorage" => Deny;
    Browser "indexedDB" => Deny;
    Browser "caches" => Deny;
    Browser "fetch" => Deny;
    Browser "XMLHttpRequest" => Deny;
    Browser "WebSocket" => Deny;
    Browser "Worker" => Deny;
    Browser "SharedWorker" => Deny;
    Browser "importScripts" => Deny;
    Browser "postMessage" => Deny;
    Browser "alert" => Deny;
    Browser "confirm" => Deny;
    Browser "prompt" => Deny;
    Browser "open" => Deny;
    Browser "close" => Deny;
    Browser "requestAnimationFrame" => Deny;
    Browser "cancelAnimationFrame" => Deny;
    Browser "performance" => Deny;
    Browser "crypto" => Deny;
    Browser "WebAssembly" => Deny;
    Browser "console" => Console;
    Browser "setTimeout" => Timer(Schedule(TimerKind::Timeout));
    Browser "setInterval" => Timer(Schedule(TimerKind::Interval));
    Browser "setImmediate" => Timer(Schedule(TimerKind::Immediate));
    Browser "clearTimeout" => Timer(Cancel(TimerKind::Timeout));
    Browser "clearInterval" => Timer(Cancel(TimerKind::Interval));
    Browser "clearImmediate" => Timer(Cancel(TimerKind::Immediate));
    Browser "Object" => Protected(BuiltinType::Object);
    Browser "Boolean" => Protected(BuiltinType::Boolean);
    Browser "Symbol" => Protected(BuiltinType::Symbol);
    Browser "Error" => Protected(BuiltinType::Error);
    Browser "EvalError" => Protected(BuiltinType::EvalError);
    Browser "InternalError" => Protected(BuiltinType::InternalError);
    Browser "RangeError" => Protected(BuiltinType::RangeError);
    Browser "ReferenceError" => Protected(BuiltinType::ReferenceError);
    Browser "SyntaxError" => Protected(BuiltinType::SyntaxError);
    Browser "TypeError" => Protected(BuiltinType::TypeError);
    Browser "URIError" => Protected(BuiltinType::URIError);
    Browser "Number" => Protected(BuiltinType::Number);
    Browser "Math" => Protected(BuiltinType::Math);
    Browser "Date" => Protected(BuiltinType::Date);
    Browser "String" => Protected(BuiltinType::String);
    Browser "RegExp" => Protected(BuiltinType::RegExp);
    Browser "Array" => Protected(BuiltinType::Array);
    Browser "Int8Array" => Protected(BuiltinType::Int8Array);
    Browser "Uint8Array" => Protected(BuiltinType::Uint8Array);
    Browser "Uint8ClampedArray" => Protected(BuiltinType::Uint8ClampedArray);
    Browser "Int16Array" => Protected(BuiltinType::Int16Array);
    Browser "Uint16Array" => Protected(BuiltinType::Uint16Array);
    Browser "Int32Array" => Protected(BuiltinType::Int32Array);
    Browser "Uint32Array" => Protected(BuiltinType::Uint32Array);
    Browser "Float32Array" => Protected(BuiltinType::Float32Array);
    Browser "Float64Array" => Protected(BuiltinType::Float64Array);
    Browser "Map" => Protected(BuiltinType::Map);
    Browser "Set" => Protected(BuiltinType::Set);
    Browser "WeakMap" => Protected(BuiltinType::WeakMap);
    Browser "WeakSet" => Protected(BuiltinType::WeakSet);
    Browser "ArrayBuffer" => Protected(BuiltinType::ArrayBuffer);
    Browser "SharedArrayBuffer" => Protected(BuiltinType::SharedArrayBuffer);
    Browser "Atomics" => Protected(BuiltinType::Atomics);
    Browser "DataView" => Protected(BuiltinType::DataView);
    Browser "JSON" => Protected(BuiltinType::JSON);
    Browser "Promise" => Protected(BuiltinType::Promise);
    Browser "Generator" => Protected(BuiltinType::Generator);
    Browser "GeneratorFunction" => Protected(BuiltinType::GeneratorFunction);
    Browser "Reflect" => Protected(BuiltinType::Reflect);
    Browser "Proxy" => Protected(BuiltinType::Proxy);
    Browser "Intl" => Protected(BuiltinType::Intl);
    Browser "Buffer" => Protected(BuiltinType::Buffer);
    Browser "NaN" => Passthrough;
    Browser "Infinity" => Passthrough;
    Browser "undefined" => Passthrough;
    Browser "isNaN" => Passthrough;
    Browser "isFinite" => Passthrough;
    Browser "parseInt" => Passthrough;
    Browser "parseFloat" => Passthrough;
};

pub fn entries_for(root: RootKind) -> impl Iterator<Item = &'static Capability> {
    CAPABILITY_TABLE.iter().filter(move |c| c.root == root)
}

pub fn lookup(root: RootKind, name: &str) -> Option<&'static Capability> {
    entries_for(root).find(|c| c.name == name)
}
