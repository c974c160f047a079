//! Sealed registry of restricted built-in constructors.
//!
//! Every supported built-in tag maps to a factory that builds instance data.
//! [`protect`] turns a tag into a constructor wrapper whose `constructor`
//! slot is the inert [`severed_marker`], then proves the wrapper works by
//! constructing one instance. Nothing here looks a constructor up by name in
//! a live global scope.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::capability::RootKind;
use crate::error::ContextError;
use crate::types::{JsFunction, JsObject, JsObjectData, JsValue};

/// What a built-in tag turns into when protection is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Constructor,
    /// A namespace object (`Math`, `JSON`, ...). Never constructible.
    Namespace,
    /// Named by some engines but not a global binding in this host.
    Unavailable,
}

macro_rules! builtin_types {
    ($($variant:ident => $kind:ident, $arity:literal;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BuiltinType {
            $($variant,)*
        }

        impl BuiltinType {
            pub const ALL: &'static [BuiltinType] = &[$(BuiltinType::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(BuiltinType::$variant => stringify!($variant),)*
                }
            }

            pub const fn kind(self) -> BuiltinKind {
                match self {
                    $(BuiltinType::$variant => BuiltinKind::$kind,)*
                }
            }

            const fn arity(self) -> usize {
                match self {
                    $(BuiltinType::$variant => $arity,)*
                }
            }
        }
    };
}

builtin_types! {
    Object => Constructor, 1;
    Boolean => Constructor, 1;
    Symbol => Constructor, 0;
    Error => Constructor, 1;
    EvalError => Constructor, 1;
    InternalError => Unavailable, 1;
    RangeError => Constructor, 1;
    ReferenceError => Constructor, 1;
    SyntaxError => Constructor, 1;
    TypeError => Constructor, 1;
    URIError => Constructor, 1;
    Number => Constructor, 1;
    Math => Namespace, 0;
    Date => Constructor, 7;
    String => Constructor, 1;
    RegExp => Constructor, 2;
    Array => Constructor, 1;
    Int8Array => Constructor, 3;
    Uint8Array => Constructor, 3;
    Uint8ClampedArray => Constructor, 3;
    Int16Array => Constructor, 3;
    Uint16Array => Constructor, 3;
    Int32Array => Constructor, 3;
    Uint32Array => Constructor, 3;
    Float32Array => Constructor, 3;
    Float64Array => Constructor, 3;
    Map => Constructor, 0;
    Set => Constructor, 0;
    WeakMap => Constructor, 0;
    WeakSet => Constructor, 0;
    ArrayBuffer => Constructor, 1;
    SharedArrayBuffer => Constructor, 1;
    Atomics => Namespace, 0;
    DataView => Constructor, 1;
    JSON => Namespace, 0;
    Promise => Constructor, 1;
    Generator => Unavailable, 0;
    GeneratorFunction => Unavailable, 1;
    Reflect => Namespace, 0;
    Proxy => Constructor, 2;
    Intl => Namespace, 0;
    Buffer => Constructor, 2;
}

impl BuiltinType {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.name() == name)
    }

    /// `Buffer` belongs to the server root only; every other tag is a
    /// language built-in and may be requested from either root.
    pub fn available_on(self, root: RootKind) -> bool {
        match self {
            BuiltinType::Buffer => root == RootKind::Server,
            _ => true,
        }
    }

    fn element_size(self) -> Option<usize> {
        match self {
            BuiltinType::Int8Array
            | BuiltinType::Uint8Array
            | BuiltinType::Uint8ClampedArray
            | BuiltinType::Buffer => Some(1),
            BuiltinType::Int16Array | BuiltinType::Uint16Array => Some(2),
            BuiltinType::Int32Array | BuiltinType::Uint32Array | BuiltinType::Float32Array => {
                Some(4)
            }
            BuiltinType::Float64Array => Some(8),
            _ => None,
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Factory = fn(BuiltinType, &[JsValue]) -> Result<JsObjectData, ContextError>;

/// Tag-to-factory table, built once and never mutated afterwards.
pub struct BuiltinRegistry {
    factories: FxHashMap<BuiltinType, Factory>,
}

static REGISTRY: LazyLock<BuiltinRegistry> = LazyLock::new(BuiltinRegistry::seal);

impl BuiltinRegistry {
    pub fn global() -> &'static BuiltinRegistry {
        &REGISTRY
    }

    fn seal() -> Self {
        let factories = BuiltinType::ALL
            .iter()
            .filter_map(|ty| factory_for(*ty).map(|f| (*ty, f)))
            .collect();
        Self { factories }
    }

    pub fn contains(&self, ty: BuiltinType) -> bool {
        self.factories.contains_key(&ty)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn factory(&self, ty: BuiltinType) -> Option<Factory> {
        self.factories.get(&ty).copied()
    }
}

fn factory_for(ty: BuiltinType) -> Option<Factory> {
    if ty.kind() != BuiltinKind::Constructor {
        return None;
    }
    let factory: Factory = match ty {
        BuiltinType::Object => |_, _| Ok(JsObjectData::new()),
        BuiltinType::Boolean => |ty, args| {
            let value = args.first().is_some_and(JsValue::to_boolean);
            Ok(primitive_wrapper(ty, JsValue::Boolean(value)))
        },
        BuiltinType::Number => |ty, args| {
            let value = args.first().map_or(0.0, JsValue::to_number);
            Ok(primitive_wrapper(ty, JsValue::Number(value)))
        },
        BuiltinType::String => |ty, args| {
            let text = args.first().map(ToString::to_string).unwrap_or_default();
            let mut data = primitive_wrapper(ty, JsValue::from(text.as_str()));
            data.insert_property("length", JsValue::Number(text.encode_utf16().count() as f64));
            Ok(data)
        },
        BuiltinType::Symbol => |ty, _| Err(ContextError::NotAConstructor {
            name: ty.name().to_string(),
        }),
        BuiltinType::Date => date_instance,
        BuiltinType::Error
        | BuiltinType::EvalError
        | BuiltinType::RangeError
        | BuiltinType::ReferenceError
        | BuiltinType::SyntaxError
        | BuiltinType::TypeError
        | BuiltinType::URIError => error_instance,
        BuiltinType::RegExp => regexp_instance,
        BuiltinType::Array => array_instance,
        BuiltinType::Map | BuiltinType::Set | BuiltinType::WeakMap | BuiltinType::WeakSet => {
            |ty, _| Ok(JsObjectData::with_class(ty.name()))
        }
        BuiltinType::ArrayBuffer | BuiltinType::SharedArrayBuffer => |ty, args| {
            let len = length_argument(args.first())?;
            if allocation_size(len, 1).is_none() {
                return Err(ContextError::InvalidArgument(
                    "Array buffer allocation failed".to_string(),
                ));
            }
            let mut data = JsObjectData::with_class(ty.name());
            data.byte_data = Some(vec![0; len]);
            data.insert_property("byteLength", JsValue::Number(len as f64));
            Ok(data)
        },
        BuiltinType::DataView => dataview_instance,
        BuiltinType::Promise => promise_instance,
        BuiltinType::Proxy => proxy_instance,
        _ if ty.element_size().is_some() => typed_array_instance,
        _ => return None,
    };
    Some(factory)
}

/// Largest backing store a protected constructor will allocate for one
/// instance, in bytes.
pub const MAX_ALLOCATION_BYTES: usize = 1 << 30;

// Byte size of `count` items of `size` bytes, if it fits the allocation cap.
fn allocation_size(count: usize, size: usize) -> Option<usize> {
    count
        .checked_mul(size)
        .filter(|bytes| *bytes <= MAX_ALLOCATION_BYTES)
}

fn primitive_wrapper(ty: BuiltinType, value: JsValue) -> JsObjectData {
    let mut data = JsObjectData::with_class(ty.name());
    data.primitive_value = Some(value);
    data
}

// §7.1.22 ToIndex, for lengths given to buffers and arrays
fn length_argument(value: Option<&JsValue>) -> Result<usize, ContextError> {
    let Some(value) = value.filter(|v| !v.is_undefined()) else {
        return Ok(0);
    };
    let n = value.to_number();
    let n = if n.is_nan() { 0.0 } else { n.trunc() };
    if !(0.0..=f64::from(u32::MAX)).contains(&n) {
        return Err(ContextError::InvalidArgument("Invalid array length".to_string()));
    }
    Ok(n as usize)
}

fn date_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let time = match args.first() {
        Some(JsValue::Number(ms)) => ms.trunc(),
        _ => chrono::Utc::now().timestamp_millis() as f64,
    };
    Ok(primitive_wrapper(ty, JsValue::Number(time)))
}

fn error_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let mut data = JsObjectData::with_class("Error");
    data.insert_property("name", JsValue::from(ty.name()));
    let message = match args.first() {
        Some(v) if !v.is_undefined() => v.to_string(),
        _ => String::new(),
    };
    data.insert_property("message", JsValue::from(message.as_str()));
    Ok(data)
}

fn regexp_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let source = match args.first() {
        Some(v) if !v.is_undefined() => v.to_string(),
        _ => "(?:)".to_string(),
    };
    let flags = match args.get(1) {
        Some(v) if !v.is_undefined() => v.to_string(),
        _ => String::new(),
    };
    let mut seen = String::new();
    for flag in flags.chars() {
        if !"dgimsuvy".contains(flag) || seen.contains(flag) {
            return Err(ContextError::InvalidArgument(format!(
                "Invalid regular expression flags '{flags}'"
            )));
        }
        seen.push(flag);
    }
    let mut data = JsObjectData::with_class(ty.name());
    data.insert_property("source", JsValue::from(source.as_str()));
    data.insert_property("flags", JsValue::from(flags.as_str()));
    data.insert_property("lastIndex", JsValue::Number(0.0));
    Ok(data)
}

fn array_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    // §23.1.1.1: a single numeric argument is a length, anything else is the
    // element list.
    let elements = match args {
        [JsValue::Number(n)] => {
            if n.fract() != 0.0 || *n < 0.0 || *n > f64::from(u32::MAX) {
                return Err(ContextError::InvalidArgument("Invalid array length".to_string()));
            }
            let len = *n as usize;
            // Elements are stored densely, so the length is bounded by memory.
            if allocation_size(len, size_of::<JsValue>()).is_none() {
                return Err(ContextError::InvalidArgument(format!(
                    "Array length {len} exceeds the allocation limit"
                )));
            }
            vec![JsValue::Undefined; len]
        }
        _ => args.to_vec(),
    };
    let mut data = JsObjectData::with_class(ty.name());
    data.insert_property("length", JsValue::Number(elements.len() as f64));
    data.array_elements = Some(elements);
    Ok(data)
}

fn typed_array_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let Some(size) = ty.element_size() else {
        return Err(ContextError::UnknownBuiltin {
            name: ty.name().to_string(),
        });
    };
    let len = length_argument(args.first())?;
    let Some(byte_length) = allocation_size(len, size) else {
        return Err(ContextError::InvalidArgument(format!(
            "Invalid typed array length: {len}"
        )));
    };
    let mut data = JsObjectData::with_class(ty.name());
    data.byte_data = Some(vec![0; byte_length]);
    data.insert_property("length", JsValue::Number(len as f64));
    data.insert_property("byteLength", JsValue::Number(byte_length as f64));
    Ok(data)
}

fn dataview_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let byte_length = match args.first() {
        Some(JsValue::Object(buffer))
            if matches!(
                buffer.class_name().as_str(),
                "ArrayBuffer" | "SharedArrayBuffer"
            ) =>
        {
            buffer.borrow().byte_data.as_ref().map_or(0, Vec::len)
        }
        _ => {
            return Err(ContextError::InvalidArgument(
                "First argument to DataView constructor must be an ArrayBuffer".to_string(),
            ));
        }
    };
    let mut data = JsObjectData::with_class(ty.name());
    if let Some(buffer) = args.first() {
        data.insert_property("buffer", buffer.clone());
    }
    data.insert_property("byteLength", JsValue::Number(byte_length as f64));
    Ok(data)
}

fn promise_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    let Some(JsValue::Object(executor)) = args.first().filter(|v| v.is_callable()) else {
        return Err(ContextError::InvalidArgument(
            "Promise resolver is not a function".to_string(),
        ));
    };
    // The executor runs synchronously; whichever settle function it calls
    // first decides the state recorded on the instance.
    let outcome = JsObject::plain();
    let settle = |state: &'static str| {
        let outcome = outcome.clone();
        JsValue::Object(JsObject::function(JsFunction::native("", 1, move |_, args| {
            if !outcome.has_own("state") {
                outcome.set("state", JsValue::from(state));
                outcome.set("value", args.first().cloned().unwrap_or(JsValue::Undefined));
            }
            Ok(JsValue::Undefined)
        })))
    };
    let resolve = settle("fulfilled");
    let reject = settle("rejected");
    if let Err(err) = executor.call(&JsValue::Undefined, &[resolve, reject.clone()]) {
        if let Some(reject) = reject.as_object() {
            reject.call(&JsValue::Undefined, &[JsValue::from(err.to_string().as_str())])?;
        }
    }

    let mut data = JsObjectData::with_class(ty.name());
    let state = match outcome.get("state") {
        JsValue::Undefined => JsValue::from("pending"),
        state => state,
    };
    data.insert_property("[[PromiseState]]", state);
    data.insert_property("[[PromiseResult]]", outcome.get("value"));
    Ok(data)
}

fn proxy_instance(ty: BuiltinType, args: &[JsValue]) -> Result<JsObjectData, ContextError> {
    match args {
        [JsValue::Object(target), JsValue::Object(handler), ..] => {
            let mut data = JsObjectData::with_class(ty.name());
            data.insert_property("[[ProxyTarget]]", JsValue::Object(target.clone()));
            data.insert_property("[[ProxyHandler]]", JsValue::Object(handler.clone()));
            Ok(data)
        }
        _ => Err(ContextError::InvalidArgument(
            "Cannot create proxy with a non-object as target or handler".to_string(),
        )),
    }
}

/// The inert value installed wherever a constructor-of-constructor path
/// would otherwise lead to a code-from-string primitive. Calling it with any
/// arguments yields `undefined`; it has no `constructor` of its own.
pub fn severed_marker() -> JsValue {
    JsValue::Object(JsObject::function(JsFunction::native("", 0, |_, _| {
        Ok(JsValue::Undefined)
    })))
}

/// Cuts `target.constructor` so that it resolves to a fresh severed marker.
pub fn sever(target: &JsObject) {
    target.set("constructor", severed_marker());
}

/// Builds the protected wrapper for `ty` as seen from `root`.
///
/// The returned constructor has been exercised once with no arguments; any
/// tag whose wrapper cannot produce an instance is reported as an error so
/// the caller can leave the name out.
pub fn protect(ty: BuiltinType, root: RootKind) -> Result<JsValue, ContextError> {
    if !ty.available_on(root) {
        return Err(ContextError::UnavailableOnRoot {
            name: ty.name().to_string(),
            root,
        });
    }
    match ty.kind() {
        BuiltinKind::Constructor => {}
        BuiltinKind::Namespace => {
            return Err(ContextError::NotAConstructor {
                name: ty.name().to_string(),
            });
        }
        BuiltinKind::Unavailable => {
            return Err(ContextError::UnknownBuiltin {
                name: ty.name().to_string(),
            });
        }
    }
    let factory = BuiltinRegistry::global()
        .factory(ty)
        .ok_or_else(|| ContextError::UnknownBuiltin {
            name: ty.name().to_string(),
        })?;

    let wrapper = JsObject::plain();
    let creator = wrapper.downgrade();
    let constructor = JsFunction::constructor(ty.name(), ty.arity(), move |_this, args| {
        let mut data = factory(ty, args)?;
        if let Some(creator) = creator.upgrade() {
            data.insert_property("constructor", JsValue::Object(creator));
        }
        Ok(JsValue::Object(JsObject::new(data)))
    });
    {
        let mut data = wrapper.borrow_mut();
        data.class_name = "Function".to_string();
        data.insert_property("name", JsValue::from(ty.name()));
        data.insert_property("length", JsValue::Number(ty.arity() as f64));
        data.insert_property("prototype", JsValue::Object(JsObject::plain()));
        data.callable = Some(constructor);
    }
    sever(&wrapper);

    wrapper
        .construct(&[])
        .map_err(|err| ContextError::ConstructionFailed {
            name: ty.name().to_string(),
            reason: err.to_string(),
        })?;
    debug!(builtin = %ty, %root, "protected constructor ready");
    Ok(JsValue::Object(wrapper))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construct(ty: BuiltinType, args: &[JsValue]) -> JsObject {
        let ctor = protect(ty, RootKind::Browser).unwrap();
        let instance = ctor.as_object().unwrap().construct(args).unwrap();
        instance.as_object().unwrap().clone()
    }

    #[test]
    fn registry_covers_every_constructor_tag() {
        let registry = BuiltinRegistry::global();
        for ty in BuiltinType::ALL {
            assert_eq!(
                registry.contains(*ty),
                ty.kind() == BuiltinKind::Constructor,
                "{ty}"
            );
        }
        assert!(!registry.is_empty());
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(BuiltinType::from_name("Uint8ClampedArray"), Some(BuiltinType::Uint8ClampedArray));
        assert_eq!(BuiltinType::from_name("JSON"), Some(BuiltinType::JSON));
        assert_eq!(BuiltinType::from_name("Function"), None);
    }

    #[test]
    fn wrapper_chain_is_severed() {
        let ctor = protect(BuiltinType::Object, RootKind::Browser).unwrap();
        let ctor = ctor.as_object().unwrap();
        let chain = ctor.get("constructor");
        let marker = chain.as_object().unwrap();
        let result = marker
            .call(&JsValue::Undefined, &[JsValue::from("return process")])
            .unwrap();
        assert!(result.is_undefined());
        assert!(marker.get("constructor").is_undefined());
        assert!(marker.construct(&[]).is_err());
    }

    #[test]
    fn instances_point_back_at_the_wrapper() {
        let ctor = protect(BuiltinType::Map, RootKind::Browser).unwrap();
        let ctor = ctor.as_object().unwrap();
        let instance = ctor.construct(&[]).unwrap();
        let instance = instance.as_object().unwrap();
        assert_eq!(instance.class_name(), "Map");
        assert!(instance.get("constructor").as_object().unwrap().ptr_eq(ctor));
        let escape = ctor.get("constructor");
        assert!(escape.as_object().unwrap().call(&JsValue::Undefined, &[]).unwrap().is_undefined());
    }

    #[test]
    fn namespaces_and_throwing_constructors_are_refused() {
        for ty in [
            BuiltinType::Math,
            BuiltinType::JSON,
            BuiltinType::Symbol,
            BuiltinType::Promise,
            BuiltinType::Proxy,
            BuiltinType::DataView,
            BuiltinType::InternalError,
            BuiltinType::GeneratorFunction,
        ] {
            assert!(protect(ty, RootKind::Browser).is_err(), "{ty}");
        }
    }

    #[test]
    fn buffer_is_server_only() {
        assert!(protect(BuiltinType::Buffer, RootKind::Server).is_ok());
        assert_eq!(
            protect(BuiltinType::Buffer, RootKind::Browser).unwrap_err(),
            ContextError::UnavailableOnRoot {
                name: "Buffer".to_string(),
                root: RootKind::Browser,
            }
        );
    }

    #[test]
    fn typed_arrays_allocate_zeroed_storage() {
        let array = construct(BuiltinType::Float64Array, &[JsValue::Number(4.0)]);
        assert!(array.get("length").same_value(&JsValue::Number(4.0)));
        assert!(array.get("byteLength").same_value(&JsValue::Number(32.0)));
        assert_eq!(array.borrow().byte_data.as_deref(), Some(&[0_u8; 32][..]));
    }

    #[test]
    fn oversized_allocations_are_refused() {
        for (ty, len) in [
            (BuiltinType::Float64Array, 4_294_967_295.0),
            (BuiltinType::Uint8Array, (MAX_ALLOCATION_BYTES + 1) as f64),
            (BuiltinType::ArrayBuffer, (MAX_ALLOCATION_BYTES + 1) as f64),
            (BuiltinType::Array, 4_294_967_295.0),
        ] {
            let ctor = protect(ty, RootKind::Browser).unwrap();
            let err = ctor
                .as_object()
                .unwrap()
                .construct(&[JsValue::Number(len)])
                .unwrap_err();
            assert!(matches!(err, ContextError::InvalidArgument(_)), "{ty}");
        }
    }

    #[test]
    fn errors_carry_name_and_message() {
        let err = construct(BuiltinType::RangeError, &[JsValue::from("too far")]);
        assert_eq!(err.get("name").to_string(), "RangeError");
        assert_eq!(err.get("message").to_string(), "too far");
    }

    #[test]
    fn array_length_argument() {
        let array = construct(BuiltinType::Array, &[JsValue::Number(3.0)]);
        assert!(array.get("length").same_value(&JsValue::Number(3.0)));
        let ctor = protect(BuiltinType::Array, RootKind::Browser).unwrap();
        assert!(ctor.as_object().unwrap().construct(&[JsValue::Number(1.5)]).is_err());
        let listed = construct(BuiltinType::Array, &[JsValue::from("a"), JsValue::from("b")]);
        assert!(listed.get("length").same_value(&JsValue::Number(2.0)));
    }

    #[test]
    fn regexp_validates_flags() {
        let re = construct(BuiltinType::RegExp, &[JsValue::from("a+"), JsValue::from("gi")]);
        assert_eq!(re.get("source").to_string(), "a+");
        let ctor = protect(BuiltinType::RegExp, RootKind::Browser).unwrap();
        let bad = ctor
            .as_object()
            .unwrap()
            .construct(&[JsValue::from("a"), JsValue::from("gg")]);
        assert!(bad.is_err());
    }

    #[test]
    fn primitive_wrappers_hold_values() {
        let b = construct(BuiltinType::Boolean, &[JsValue::from("x")]);
        assert!(b.borrow().primitive_value.as_ref().unwrap().same_value(&JsValue::Boolean(true)));
        let n = construct(BuiltinType::Number, &[JsValue::from("7")]);
        assert_eq!(JsValue::Object(n).to_number(), 7.0);
        let d = construct(BuiltinType::Date, &[JsValue::Number(86_400_000.0)]);
        assert_eq!(JsValue::Object(d).to_number(), 86_400_000.0);
    }

    #[test]
    fn dataview_and_promise_work_with_arguments() {
        let buffer = construct(BuiltinType::ArrayBuffer, &[JsValue::Number(8.0)]);
        let view = BuiltinRegistry::global().factory(BuiltinType::DataView).unwrap()(
            BuiltinType::DataView,
            &[JsValue::Object(buffer)],
        )
        .unwrap();
        assert!(view.properties["byteLength"].same_value(&JsValue::Number(8.0)));

        let executor = JsObject::function(JsFunction::native("executor", 2, |_, args| {
            args[0]
                .as_object()
                .unwrap()
                .call(&JsValue::Undefined, &[JsValue::Number(1.0)])
        }));
        let promise = BuiltinRegistry::global().factory(BuiltinType::Promise).unwrap()(
            BuiltinType::Promise,
            &[JsValue::Object(executor)],
        )
        .unwrap();
        assert_eq!(promise.properties["[[PromiseState]]"].to_string(), "fulfilled");
    }
}
