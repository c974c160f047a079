use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::error::ContextError;

/// Result of invoking a native function.
pub type JsResult = Result<JsValue, ContextError>;

/// Native call behaviour: `(this, arguments) -> completion`.
pub type NativeFn = Rc<dyn Fn(&JsValue, &[JsValue]) -> JsResult>;

#[derive(Clone, Debug)]
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(JsString),
    BigInt(JsBigInt),
    Object(JsObject),
}

// UTF-16 code unit string, ECMA-262 §6.1.4
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsString {
    pub code_units: Vec<u16>,
}

impl JsString {
    pub fn from_str(s: &str) -> Self {
        Self {
            code_units: s.encode_utf16().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code_units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.code_units.len()
    }

    pub fn to_rust_string(&self) -> String {
        String::from_utf16_lossy(&self.code_units)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rust_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsBigInt {
    pub value: num_bigint::BigInt,
}

/// Native function record stored in an object's `callable` slot.
///
/// Cloning a `JsFunction` shares the underlying closure, so a deep-cloned
/// function object still forwards to the same host behaviour.
#[derive(Clone)]
pub struct JsFunction {
    pub name: String,
    pub arity: usize,
    pub is_constructor: bool,
    behaviour: NativeFn,
}

impl JsFunction {
    pub fn native(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&JsValue, &[JsValue]) -> JsResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            is_constructor: false,
            behaviour: Rc::new(f),
        }
    }

    /// A function that may also be used with `new`. Calling and constructing
    /// run the same behaviour.
    pub fn constructor(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&JsValue, &[JsValue]) -> JsResult + 'static,
    ) -> Self {
        Self {
            is_constructor: true,
            ..Self::native(name, arity, f)
        }
    }

    pub fn invoke(&self, this: &JsValue, args: &[JsValue]) -> JsResult {
        (self.behaviour)(this, args)
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsFunction::Native({:?}, {})", self.name, self.arity)
    }
}

#[derive(Debug, Clone)]
pub struct JsObjectData {
    pub class_name: String,
    pub properties: BTreeMap<String, JsValue>,
    pub callable: Option<JsFunction>,
    pub primitive_value: Option<JsValue>,
    pub array_elements: Option<Vec<JsValue>>,
    pub byte_data: Option<Vec<u8>>,
}

impl JsObjectData {
    pub fn new() -> Self {
        Self::with_class("Object")
    }

    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: BTreeMap::new(),
            callable: None,
            primitive_value: None,
            array_elements: None,
            byte_data: None,
        }
    }

    pub fn insert_property(&mut self, key: impl Into<String>, value: JsValue) {
        self.properties.insert(key.into(), value);
    }
}

impl Default for JsObjectData {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a heap object. Clones alias the same object.
#[derive(Clone)]
pub struct JsObject(Rc<RefCell<JsObjectData>>);

/// Non-owning handle, used where an object must point back at its creator.
#[derive(Clone)]
pub struct WeakObject(Weak<RefCell<JsObjectData>>);

impl WeakObject {
    pub fn upgrade(&self) -> Option<JsObject> {
        self.0.upgrade().map(JsObject)
    }
}

impl JsObject {
    pub fn new(data: JsObjectData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    pub fn plain() -> Self {
        Self::new(JsObjectData::new())
    }

    pub fn function(func: JsFunction) -> Self {
        let mut data = JsObjectData::with_class("Function");
        data.insert_property("name", JsValue::from(func.name.as_str()));
        data.insert_property("length", JsValue::Number(func.arity as f64));
        data.callable = Some(func);
        Self::new(data)
    }

    pub fn borrow(&self) -> Ref<'_, JsObjectData> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, JsObjectData> {
        self.0.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakObject {
        WeakObject(Rc::downgrade(&self.0))
    }

    /// Reference identity, the `===` of two objects.
    pub fn ptr_eq(&self, other: &JsObject) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn class_name(&self) -> String {
        self.borrow().class_name.clone()
    }

    /// Own property lookup; missing keys read as `undefined`.
    pub fn get(&self, key: &str) -> JsValue {
        self.borrow()
            .properties
            .get(key)
            .cloned()
            .unwrap_or(JsValue::Undefined)
    }

    pub fn set(&self, key: impl Into<String>, value: JsValue) {
        self.borrow_mut().insert_property(key, value);
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.borrow().properties.contains_key(key)
    }

    pub fn is_callable(&self) -> bool {
        self.borrow().callable.is_some()
    }

    pub fn is_constructor(&self) -> bool {
        self.borrow()
            .callable
            .as_ref()
            .is_some_and(|f| f.is_constructor)
    }

    pub fn call(&self, this: &JsValue, args: &[JsValue]) -> JsResult {
        // Release the borrow before running the closure; callees may touch us.
        let func = self.borrow().callable.clone();
        match func {
            Some(func) => func.invoke(this, args),
            None => Err(ContextError::NotCallable {
                name: self.class_name(),
            }),
        }
    }

    pub fn construct(&self, args: &[JsValue]) -> JsResult {
        let func = self.borrow().callable.clone();
        match func {
            Some(func) if func.is_constructor => func.invoke(&JsValue::Undefined, args),
            Some(func) => Err(ContextError::NotAConstructor { name: func.name }),
            None => Err(ContextError::NotAConstructor {
                name: self.class_name(),
            }),
        }
    }

    fn deep_clone_into(&self, seen: &mut FxHashMap<usize, JsObject>) -> JsObject {
        if let Some(copy) = seen.get(&self.addr()) {
            return copy.clone();
        }
        let (shell, properties, elements) = {
            let data = self.borrow();
            let shell = JsObjectData {
                class_name: data.class_name.clone(),
                properties: BTreeMap::new(),
                callable: data.callable.clone(),
                primitive_value: data.primitive_value.clone(),
                array_elements: None,
                byte_data: data.byte_data.clone(),
            };
            (shell, data.properties.clone(), data.array_elements.clone())
        };
        let copy = JsObject::new(shell);
        seen.insert(self.addr(), copy.clone());

        let properties = properties
            .into_iter()
            .map(|(key, value)| (key, value.deep_clone_into(seen)))
            .collect();
        let elements = elements.map(|items| {
            items
                .iter()
                .map(|value| value.deep_clone_into(seen))
                .collect()
        });
        {
            let mut data = copy.borrow_mut();
            data.properties = properties;
            data.array_elements = elements;
        }
        copy
    }
}

impl fmt::Debug for JsObject {
    // Objects may be cyclic; never recurse into properties here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsObject({}@{:#x})", self.class_name(), self.addr())
    }
}

impl JsValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, JsValue::Object(o) if o.is_callable())
    }

    pub fn as_object(&self) -> Option<&JsObject> {
        match self {
            JsValue::Object(o) => Some(o),
            _ => None,
        }
    }

    // §13.5.3 typeof
    pub fn type_of(&self) -> &'static str {
        match self {
            JsValue::Undefined => "undefined",
            JsValue::Null => "object",
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::BigInt(_) => "bigint",
            JsValue::Object(o) if o.is_callable() => "function",
            JsValue::Object(_) => "object",
        }
    }

    // §7.1.2 ToBoolean
    pub fn to_boolean(&self) -> bool {
        match self {
            JsValue::Undefined | JsValue::Null => false,
            JsValue::Boolean(b) => *b,
            JsValue::Number(n) => !(n.is_nan() || *n == 0.0),
            JsValue::String(s) => !s.is_empty(),
            JsValue::BigInt(b) => b.value != num_bigint::BigInt::from(0),
            JsValue::Object(_) => true,
        }
    }

    // §7.1.4 ToNumber, without the object-to-primitive protocol
    pub fn to_number(&self) -> f64 {
        match self {
            JsValue::Undefined => f64::NAN,
            JsValue::Null => 0.0,
            JsValue::Boolean(b) => f64::from(u8::from(*b)),
            JsValue::Number(n) => *n,
            JsValue::String(s) => {
                let text = s.to_rust_string();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            JsValue::BigInt(_) => f64::NAN,
            JsValue::Object(o) => o
                .borrow()
                .primitive_value
                .as_ref()
                .map_or(f64::NAN, JsValue::to_number),
        }
    }

    /// Same-value identity: primitives compare by value, objects by reference.
    pub fn same_value(&self, other: &JsValue) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) | (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => number_ops::same_value(*a, *b),
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::BigInt(a), JsValue::BigInt(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Structural copy with no object shared with the source. Cycles and
    /// repeated references are preserved; function objects keep their native
    /// behaviour.
    pub fn deep_clone(&self) -> JsValue {
        let mut seen = FxHashMap::default();
        self.deep_clone_into(&mut seen)
    }

    fn deep_clone_into(&self, seen: &mut FxHashMap<usize, JsObject>) -> JsValue {
        match self {
            JsValue::Object(o) => JsValue::Object(o.deep_clone_into(seen)),
            primitive => primitive.clone(),
        }
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::String(JsString::from_str(s))
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<num_bigint::BigInt> for JsValue {
    fn from(value: num_bigint::BigInt) -> Self {
        JsValue::BigInt(JsBigInt { value })
    }
}

impl From<JsObject> for JsValue {
    fn from(o: JsObject) -> Self {
        JsValue::Object(o)
    }
}

// §6.1.6.1 Number type operations
pub mod number_ops {
    pub fn same_value(x: f64, y: f64) -> bool {
        if x.is_nan() && y.is_nan() {
            return true;
        }
        if x == 0.0 && y == 0.0 {
            return x.is_sign_positive() == y.is_sign_positive();
        }
        x == y
    }

    pub fn to_string(x: f64) -> String {
        if x.is_nan() {
            return "NaN".to_string();
        }
        if x == 0.0 {
            return "0".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        // Shortest round-tripping form, as Number::toString requires
        let mut buf = ryu_js::Buffer::new();
        buf.format(x).to_string()
    }
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Null => write!(f, "null"),
            JsValue::Boolean(b) => write!(f, "{b}"),
            JsValue::Number(n) => write!(f, "{}", number_ops::to_string(*n)),
            JsValue::String(s) => write!(f, "{s}"),
            JsValue::BigInt(b) => write!(f, "{}n", b.value),
            JsValue::Object(o) => {
                let data = o.borrow();
                match (&data.callable, &data.primitive_value) {
                    (Some(func), _) => write!(f, "function {}() {{ [native code] }}", func.name),
                    (None, Some(primitive)) => write!(f, "{primitive}"),
                    (None, None) => write!(f, "[object {}]", data.class_name),
                }
            }
        }
    }
}
