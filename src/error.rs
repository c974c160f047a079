//! Errors raised by native functions and by the built-in registry.

use thiserror::Error;

use crate::capability::RootKind;

/// Errors surfaced while building protected bindings or while evaluated code
/// calls into them.
///
/// Context construction never returns these to the caller; they only escape
/// through native function calls (`JsResult`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A restricted timer wrapper was handed something other than a function.
    #[error("{name} requires function as argument")]
    RequiresFunction { name: String },

    /// `new` was applied to a value that cannot construct instances.
    #[error("{name} is not a constructor")]
    NotAConstructor { name: String },

    /// A call was attempted on a value with no call behaviour.
    #[error("{name} is not a function")]
    NotCallable { name: String },

    /// The built-in tag has no entry in the sealed registry.
    #[error("{name} is not a registered built-in")]
    UnknownBuiltin { name: String },

    /// The built-in exists but the given root never exposes it.
    #[error("{name} is not available on the {root} root")]
    UnavailableOnRoot { name: String, root: RootKind },

    /// Instantiation through a protected wrapper failed.
    #[error("constructing {name} failed: {reason}")]
    ConstructionFailed { name: String, reason: String },

    /// Raised by the host `Function` capability.
    #[error("code generation from strings is disallowed")]
    CodeGenerationDisallowed,

    /// A native function rejected one of its arguments.
    #[error("{0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_function_message_names_the_function() {
        let err = ContextError::RequiresFunction {
            name: "setTimeout".to_string(),
        };
        assert_eq!(err.to_string(), "setTimeout requires function as argument");
    }

    #[test]
    fn unavailable_on_root_mentions_root() {
        let err = ContextError::UnavailableOnRoot {
            name: "Buffer".to_string(),
            root: RootKind::Browser,
        };
        assert_eq!(err.to_string(), "Buffer is not available on the browser root");
    }
}
