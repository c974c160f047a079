//! The host console: a diagnostic sink backed by `tracing`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, trace, warn};

use crate::types::{JsFunction, JsObject, JsObjectData, JsValue};

/// Target under which every console call is logged.
pub const CONSOLE_TARGET: &str = "jsse_context::console";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
    Trace,
}

impl ConsoleLevel {
    pub const ALL: [ConsoleLevel; 6] = [
        ConsoleLevel::Log,
        ConsoleLevel::Info,
        ConsoleLevel::Warn,
        ConsoleLevel::Error,
        ConsoleLevel::Debug,
        ConsoleLevel::Trace,
    ];

    pub const fn method(self) -> &'static str {
        match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub text: String,
}

/// Shared record of everything written through a host console.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    lines: Rc<RefCell<Vec<ConsoleLine>>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines.borrow().clone()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }

    fn record(&self, level: ConsoleLevel, text: String) {
        match level {
            ConsoleLevel::Log | ConsoleLevel::Info => info!(target: CONSOLE_TARGET, "{text}"),
            ConsoleLevel::Warn => warn!(target: CONSOLE_TARGET, "{text}"),
            ConsoleLevel::Error => error!(target: CONSOLE_TARGET, "{text}"),
            ConsoleLevel::Debug => debug!(target: CONSOLE_TARGET, "{text}"),
            ConsoleLevel::Trace => trace!(target: CONSOLE_TARGET, "{text}"),
        }
        self.lines.borrow_mut().push(ConsoleLine { level, text });
    }
}

/// Builds the host's console object. `object_constructor` is installed as
/// its `constructor`, mirroring how a real console reaches `Object` and, from
/// there, `Function`.
pub fn host_console(sink: &ConsoleSink, object_constructor: JsValue) -> JsObject {
    let mut data = JsObjectData::with_class("console");
    for level in ConsoleLevel::ALL {
        let sink = sink.clone();
        let method = JsFunction::native(level.method(), 0, move |_this, args| {
            let parts: Vec<String> = args.iter().map(|v| format!("{v}")).collect();
            sink.record(level, parts.join(" "));
            Ok(JsValue::Undefined)
        });
        data.insert_property(level.method(), JsValue::Object(JsObject::function(method)));
    }
    data.insert_property("constructor", object_constructor);
    JsObject::new(data)
}
