//! Restricted execution contexts for untrusted script evaluation.
//!
//! A [`Context`] maps bare identifier names to the values an evaluator should
//! resolve them to. [`create_context`] starts from a deny-everything posture:
//! every name the host's ambient roots expose is bound to `undefined`, and
//! only a short list is re-introduced in restricted form. Timers reject
//! non-function callbacks. The console is a deep clone. Built-in
//! constructors come from a sealed registry with their
//! constructor-of-constructor path cut.
//!
//! ```
//! use jsse_context::{Bindings, JsValue, allow, create_context, is_identifier};
//!
//! let mut ctx = create_context();
//! assert!(ctx.is_denied("process"));
//! assert!(ctx.is_denied("eval"));
//!
//! let mut extra = Bindings::new();
//! extra.insert("answer".to_string(), JsValue::Number(42.0));
//! extra.insert("my-name".to_string(), JsValue::Null);
//! allow(Some(&extra), &mut ctx);
//!
//! assert!(ctx.resolve("answer").same_value(&JsValue::Number(42.0)));
//! assert!(!ctx.contains("my-name"));
//! assert!(!is_identifier("for"));
//! ```
//!
//! This is a mitigation, not a security boundary: it curates bindings only
//! and does nothing about the evaluator itself.

pub mod builtins;
pub mod capability;
pub mod config;
pub mod console;
mod context;
mod error;
pub mod host;
mod identifier;
pub mod timers;
pub mod types;

pub use capability::RootKind;
pub use config::{ContextConfig, RootSelection};
pub use context::{Bindings, Context, allow, create_context, create_context_with};
pub use error::ContextError;
pub use host::{AmbientRoot, HostEnvironment, current_host};
pub use identifier::{is_identifier, is_reserved_word};
pub use timers::TimerQueue;
pub use types::{JsFunction, JsObject, JsResult, JsValue};
