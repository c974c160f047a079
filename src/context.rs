//! Building restricted contexts and merging caller bindings into them.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::builtins;
use crate::capability::{self, ALWAYS_DENIED, Policy, RootKind};
use crate::config::ContextConfig;
use crate::host::{AmbientRoot, HostEnvironment, current_host};
use crate::identifier::is_identifier;
use crate::timers;
use crate::types::JsValue;

/// Caller-supplied bindings for [`allow`].
pub type Bindings = BTreeMap<String, JsValue>;

/// What evaluated code may resolve a bare name to.
///
/// An own key holding `undefined` is a denied binding: the evaluator must
/// treat it as shadowing anything of the same name further out. A missing key
/// means the evaluator's own intrinsic (if any) is used.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: Bindings,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&JsValue> {
        self.bindings.get(name)
    }

    /// Bare-name lookup: absent and denied both read as `undefined`.
    pub fn resolve(&self, name: &str) -> JsValue {
        self.get(name).cloned().unwrap_or(JsValue::Undefined)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn is_denied(&self, name: &str) -> bool {
        self.get(name).is_some_and(JsValue::is_undefined)
    }

    /// Binds `name` to `value`. Names that fail [`is_identifier`] are
    /// refused and `false` is returned.
    pub fn set(&mut self, name: &str, value: JsValue) -> bool {
        if !is_identifier(name) {
            return false;
        }
        self.bindings.insert(name.to_string(), value);
        true
    }

    pub fn deny(&mut self, name: &str) -> bool {
        self.set(name, JsValue::Undefined)
    }

    fn remove(&mut self, name: &str) {
        self.bindings.remove(name);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsValue)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a JsValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, JsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// Creates a fresh context against this thread's default host, scanning every
/// compiled-in root.
pub fn create_context() -> Context {
    create_context_with(&current_host(), &ContextConfig::default())
}

/// Creates a fresh context from `host`, scanning the roots `config` selects.
///
/// Never fails: any binding that cannot be located, cloned or verified is
/// left out and construction carries on.
pub fn create_context_with(host: &HostEnvironment, config: &ContextConfig) -> Context {
    let mut context = Context::new();
    for name in ALWAYS_DENIED.iter().copied().chain(config.extra_denied()) {
        if !context.deny(name) {
            debug!(name, "extra deny-list entry is not an identifier");
        }
    }

    // Deny every root before re-introducing anything, so a later root's
    // denials never clobber an earlier root's restricted clones.
    let roots: Vec<&AmbientRoot> = host
        .roots()
        .filter(|root| root.kind().is_compiled_in() && config.roots().includes(root.kind()))
        .collect();
    for root in &roots {
        deny_root(&mut context, root);
    }
    for root in &roots {
        reintroduce(&mut context, root);
    }
    // Configured denials win over anything a root re-introduced.
    for name in config.extra_denied() {
        context.deny(name);
    }

    debug!(bindings = context.len(), "context constructed");
    context
}

fn deny_root(context: &mut Context, root: &AmbientRoot) {
    let kind = root.kind();
    let names = root
        .own_names()
        .chain(capability::entries_for(kind).map(|cap| cap.name));
    let mut denied = 0_usize;
    for name in names {
        if matches!(
            capability::lookup(kind, name).map(|cap| cap.policy),
            Some(Policy::Passthrough)
        ) {
            continue;
        }
        if context.deny(name) {
            denied += 1;
        }
    }
    debug!(root = %kind, denied, "ambient root denied");
}

fn reintroduce(context: &mut Context, root: &AmbientRoot) {
    let kind = root.kind();
    for cap in capability::entries_for(kind) {
        match cap.policy {
            Policy::Timer(op) => install_timer(context, root, op),
            Policy::Console => install_console(context, root, cap.name),
            Policy::Protected(ty) => install_protected(context, kind, ty),
            Policy::Deny | Policy::Passthrough => {}
        }
    }
}

fn install_timer(context: &mut Context, root: &AmbientRoot, op: timers::TimerOp) {
    match root.binding(op.name()) {
        Some(JsValue::Object(real)) if real.is_callable() => {
            context.set(op.name(), timers::restricted_clone(op, real.clone()));
        }
        _ => debug!(root = %root.kind(), timer = %op, "timer not exposed by root; left denied"),
    }
}

fn install_console(context: &mut Context, root: &AmbientRoot, name: &str) {
    let Some(console) = root.binding(name).filter(|v| v.is_object()) else {
        debug!(root = %root.kind(), "console not exposed by root; left denied");
        return;
    };
    let clone = console.deep_clone();
    match clone.as_object().map(|c| c.get("constructor")) {
        Some(JsValue::Object(ctor)) => builtins::sever(&ctor),
        _ => debug!(root = %root.kind(), "console clone has no constructor chain to sever"),
    }
    context.set(name, clone);
}

fn install_protected(context: &mut Context, kind: RootKind, ty: builtins::BuiltinType) {
    match builtins::protect(ty, kind) {
        Ok(wrapper) => {
            context.set(ty.name(), wrapper);
        }
        Err(err) => {
            debug!(root = %kind, builtin = %ty, error = %err, "built-in left out of context");
            // Keep a wrapper another root already installed.
            if context.is_denied(ty.name()) {
                context.remove(ty.name());
            }
        }
    }
}

/// Copies every identifier-named binding of `source` into `context`.
///
/// Values are copied by reference: an object passed here is the same object
/// the caller holds, and evaluated code can mutate it. Pass a
/// [`JsValue::deep_clone`] when that is not wanted. Keys failing
/// [`is_identifier`] are skipped silently.
pub fn allow(source: Option<&Bindings>, context: &mut Context) {
    let Some(source) = source else {
        return;
    };
    for (name, value) in source {
        if !context.set(name, value.clone()) {
            trace!(name = name.as_str(), "allow skipped non-identifier key");
        }
    }
}
