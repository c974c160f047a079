//! Behavioural checks on contexts built against full hosts.

#![cfg(all(feature = "server", feature = "browser"))]

use std::cell::Cell;
use std::rc::Rc;

use jsse_context::builtins::{BuiltinType, protect};
use jsse_context::capability::{self, ALWAYS_DENIED, CAPABILITY_TABLE, Policy};
use jsse_context::console::ConsoleLevel;
use jsse_context::{
    Bindings, Context, ContextConfig, ContextError, HostEnvironment, JsFunction, JsObject,
    JsValue, RootKind, RootSelection, allow, create_context, create_context_with, is_identifier,
};
use rstest::{fixture, rstest};

struct Harness {
    host: HostEnvironment,
    context: Context,
}

impl Harness {
    fn with_roots(roots: RootSelection) -> Self {
        let host = HostEnvironment::detect();
        let context = create_context_with(&host, &ContextConfig::new().with_roots(roots));
        Self { host, context }
    }

    fn function(&self, name: &str) -> JsObject {
        self.context
            .resolve(name)
            .as_object()
            .cloned()
            .unwrap_or_else(|| panic!("{name} should be an object"))
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::with_roots(RootSelection::ALL)
}

fn counting_callback() -> (JsValue, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let seen = hits.clone();
    let cb = JsObject::function(JsFunction::native("cb", 0, move |_, _| {
        seen.set(seen.get() + 1);
        Ok(JsValue::Undefined)
    }));
    (JsValue::Object(cb), hits)
}

#[test]
fn fixed_names_are_always_denied() {
    for roots in [
        RootSelection::ALL,
        RootSelection::NONE,
        RootSelection::only(RootKind::Server),
        RootSelection::only(RootKind::Browser),
    ] {
        let Harness { context, .. } = Harness::with_roots(roots);
        for name in ALWAYS_DENIED {
            assert!(context.is_denied(name), "{name} with {roots:?}");
        }
    }
}

#[rstest]
#[case("fetch")]
#[case("localStorage")]
#[case("queueMicrotask")]
#[case("XMLHttpRequest")]
#[case("navigator")]
#[case("WebAssembly")]
fn root_names_not_reintroduced_read_undefined(harness: Harness, #[case] name: &str) {
    assert!(harness.context.is_denied(name));
    assert!(harness.context.resolve(name).is_undefined());
}

// Whether any root hands `name` to the evaluator in some form.
fn reintroduced_somewhere(name: &str) -> bool {
    RootKind::ALL.iter().any(|root| {
        capability::lookup(*root, name).is_some_and(|cap| cap.policy != Policy::Deny)
    })
}

#[rstest]
fn every_other_ambient_name_reads_undefined(harness: Harness) {
    let root_names = harness
        .host
        .roots()
        .flat_map(|root| root.own_names().map(str::to_string).collect::<Vec<_>>());
    let table_names = CAPABILITY_TABLE.iter().map(|cap| cap.name.to_string());
    let mut checked = 0;
    for name in root_names.chain(table_names) {
        if reintroduced_somewhere(&name) {
            continue;
        }
        assert!(harness.context.is_denied(&name), "{name}");
        assert!(harness.context.resolve(&name).is_undefined(), "{name}");
        checked += 1;
    }
    assert!(checked > ALWAYS_DENIED.len());
}

#[rstest]
#[case("NaN")]
#[case("Infinity")]
#[case("undefined")]
#[case("parseInt")]
#[case("isFinite")]
fn passthrough_names_are_left_to_the_evaluator(harness: Harness, #[case] name: &str) {
    assert!(!harness.context.contains(name));
}

#[rstest]
#[case("setTimeout")]
#[case("setInterval")]
#[case("setImmediate")]
fn schedule_wrappers_reject_strings(harness: Harness, #[case] name: &str) {
    let wrapper = harness.function(name);
    let err = wrapper
        .call(&JsValue::Undefined, &[JsValue::from("alert(1)"), JsValue::Number(0.0)])
        .unwrap_err();
    assert_eq!(err.to_string(), format!("{name} requires function as argument"));
    assert_eq!(harness.host.timers().pending(), 0);
}

#[rstest]
fn schedule_wrapper_rejects_missing_callback(harness: Harness) {
    let err = harness
        .function("setTimeout")
        .call(&JsValue::Undefined, &[])
        .unwrap_err();
    assert_eq!(
        err,
        ContextError::RequiresFunction {
            name: "setTimeout".to_string()
        }
    );
}

#[rstest]
fn timeout_is_forwarded_to_the_host(harness: Harness) {
    let (cb, hits) = counting_callback();
    let id = harness
        .function("setTimeout")
        .call(&JsValue::Undefined, &[cb, JsValue::Number(10.0)])
        .unwrap();
    assert_eq!(id.type_of(), "number");
    assert_eq!(harness.host.timers().pending(), 1);

    harness.host.timers().advance(9);
    assert_eq!(hits.get(), 0);
    harness.host.timers().advance(1);
    assert_eq!(hits.get(), 1);
    assert_eq!(harness.host.timers().pending(), 0);
}

#[rstest]
fn clear_wrapper_cancels_through_the_host(harness: Harness) {
    let (cb, hits) = counting_callback();
    let id = harness
        .function("setInterval")
        .call(&JsValue::Undefined, &[cb, JsValue::Number(5.0)])
        .unwrap();
    harness.host.timers().advance(12);
    assert_eq!(hits.get(), 2);

    let cleared = harness
        .function("clearInterval")
        .call(&JsValue::Undefined, &[id])
        .unwrap();
    assert!(cleared.is_undefined());
    harness.host.timers().advance(50);
    assert_eq!(hits.get(), 2);
}

#[rstest]
fn clear_wrapper_accepts_anything(harness: Harness) {
    let result = harness
        .function("clearTimeout")
        .call(&JsValue::Undefined, &[JsValue::from("not an id")]);
    assert!(matches!(result, Ok(JsValue::Undefined)));
}

#[rstest]
#[case("Object")]
#[case("Array")]
#[case("Map")]
#[case("Error")]
#[case("Date")]
#[case("Uint8Array")]
#[case("Buffer")]
fn protected_constructors_sever_their_chain(harness: Harness, #[case] name: &str) {
    let wrapper = harness.function(name);
    assert!(wrapper.is_constructor());

    let instance = wrapper.construct(&[]).unwrap();
    let instance = instance.as_object().unwrap();
    assert!(instance.get("constructor").as_object().unwrap().ptr_eq(&wrapper));

    let marker = wrapper.get("constructor");
    let marker = marker.as_object().unwrap();
    assert!(!marker.is_constructor());
    assert!(marker.get("constructor").is_undefined());
    assert!(
        marker
            .call(&JsValue::Undefined, &[JsValue::from("return process")])
            .unwrap()
            .is_undefined()
    );
}

#[rstest]
#[case("Math")]
#[case("JSON")]
#[case("Symbol")]
#[case("Proxy")]
#[case("Promise")]
#[case("Generator")]
fn unverifiable_builtins_are_absent(harness: Harness, #[case] name: &str) {
    assert!(!harness.context.contains(name));
}

#[test]
fn buffer_follows_the_server_root() {
    let Harness { context, .. } = Harness::with_roots(RootSelection::only(RootKind::Browser));
    assert!(!context.contains("Buffer"));
    assert!(context.resolve("Array").is_callable());

    let Harness { context, .. } = Harness::with_roots(RootSelection::only(RootKind::Server));
    assert!(context.resolve("Buffer").is_callable());
    assert!(!context.contains("Array"));
}

#[test]
fn protect_reports_why_a_builtin_is_unavailable() {
    assert!(matches!(
        protect(BuiltinType::Buffer, RootKind::Browser),
        Err(ContextError::UnavailableOnRoot { .. })
    ));
    assert!(matches!(
        protect(BuiltinType::JSON, RootKind::Browser),
        Err(ContextError::NotAConstructor { .. })
    ));
}

#[rstest]
fn console_clone_cannot_reach_function(harness: Harness) {
    let clone = harness.function("console");
    let host_console = harness
        .host
        .root(RootKind::Server)
        .and_then(|root| root.binding("console"))
        .and_then(JsValue::as_object)
        .cloned()
        .unwrap();
    assert!(!clone.ptr_eq(&host_console));

    let object = host_console.get("constructor");
    let function = object.as_object().unwrap().get("constructor");
    assert_eq!(
        function
            .as_object()
            .unwrap()
            .construct(&[JsValue::from("return this")])
            .unwrap_err(),
        ContextError::CodeGenerationDisallowed
    );

    let object = clone.get("constructor");
    let severed = object.as_object().unwrap().get("constructor");
    let severed = severed.as_object().unwrap();
    assert!(!severed.is_constructor());
    assert!(
        severed
            .call(&JsValue::Undefined, &[JsValue::from("return this")])
            .unwrap()
            .is_undefined()
    );
}

#[rstest]
fn console_clone_still_logs_to_the_host(harness: Harness) {
    let clone = harness.function("console");
    clone
        .get("info")
        .as_object()
        .unwrap()
        .call(&JsValue::Object(clone.clone()), &[JsValue::from("hello")])
        .unwrap();
    let lines = harness.host.console_sink().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].level, ConsoleLevel::Info);
    assert_eq!(lines[0].text, "hello");
}

#[test]
fn contexts_share_no_mutable_state() {
    let host = HostEnvironment::detect();
    let first = create_context_with(&host, &ContextConfig::default());
    let second = create_context_with(&host, &ContextConfig::default());

    let console_a = first.resolve("console");
    let console_b = second.resolve("console");
    assert!(!console_a.same_value(&console_b));
    assert!(!first.resolve("setTimeout").same_value(&second.resolve("setTimeout")));
    assert!(!first.resolve("Array").same_value(&second.resolve("Array")));

    console_a.as_object().unwrap().set("log", JsValue::Null);
    assert!(console_b.as_object().unwrap().get("log").is_callable());
    assert_eq!(first.len(), second.len());
}

#[test]
fn default_contexts_are_rebuilt_each_call() {
    let a = create_context();
    let b = create_context();
    assert_eq!(a.names().collect::<Vec<_>>(), b.names().collect::<Vec<_>>());
    assert!(!a.resolve("console").same_value(&b.resolve("console")));
}

#[test]
fn allow_copies_identifier_keys_only() {
    let mut source = Bindings::new();
    source.insert("a".to_string(), JsValue::Number(1.0));
    source.insert("2bad".to_string(), JsValue::Number(2.0));
    source.insert("for".to_string(), JsValue::Number(3.0));
    let mut context = create_context();
    let before = context.len();

    allow(Some(&source), &mut context);

    assert!(context.resolve("a").same_value(&JsValue::Number(1.0)));
    assert!(!context.contains("2bad"));
    assert!(!context.contains("for"));
    assert_eq!(context.len(), before + 1);
}

#[rstest]
#[case("foo", true)]
#[case("_private", true)]
#[case("$el", true)]
#[case("café", true)]
#[case("2foo", false)]
#[case("for", false)]
#[case("my-name", false)]
#[case("", false)]
#[case("a b", false)]
fn identifier_filter(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_identifier(name), expected);
}
