//! Host timer queue and the restricted timer wrappers handed to contexts.
//!
//! The queue runs on a virtual clock: nothing fires until the host calls
//! [`TimerQueue::advance`] or [`TimerQueue::run_pending`]. Timeout and
//! interval timers share one id space, the way both Node and browsers let
//! `clearTimeout` cancel an interval.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::ContextError;
use crate::types::{JsFunction, JsObject, JsValue};

pub type TimerId = u32;

/// Longest delay a timer accepts; anything longer, shorter than 1 ms or not
/// a number runs after 1 ms instead, as in Node.
pub const TIMEOUT_MAX_MS: u64 = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Timeout,
    Interval,
    Immediate,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [TimerKind::Timeout, TimerKind::Interval, TimerKind::Immediate];

    fn shares_ids_with(self, other: TimerKind) -> bool {
        match (self, other) {
            (TimerKind::Immediate, TimerKind::Immediate) => true,
            (TimerKind::Immediate, _) | (_, TimerKind::Immediate) => false,
            _ => true,
        }
    }
}

/// A single member of the timer family, named the way scripts see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerOp {
    Schedule(TimerKind),
    Cancel(TimerKind),
}

impl TimerOp {
    pub const ALL: [TimerOp; 6] = [
        TimerOp::Schedule(TimerKind::Timeout),
        TimerOp::Schedule(TimerKind::Interval),
        TimerOp::Schedule(TimerKind::Immediate),
        TimerOp::Cancel(TimerKind::Timeout),
        TimerOp::Cancel(TimerKind::Interval),
        TimerOp::Cancel(TimerKind::Immediate),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TimerOp::Schedule(TimerKind::Timeout) => "setTimeout",
            TimerOp::Schedule(TimerKind::Interval) => "setInterval",
            TimerOp::Schedule(TimerKind::Immediate) => "setImmediate",
            TimerOp::Cancel(TimerKind::Timeout) => "clearTimeout",
            TimerOp::Cancel(TimerKind::Interval) => "clearInterval",
            TimerOp::Cancel(TimerKind::Immediate) => "clearImmediate",
        }
    }
}

impl fmt::Display for TimerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct TimerEntry {
    kind: TimerKind,
    callback: JsObject,
    args: Vec<JsValue>,
    due_ms: u64,
    interval_ms: Option<u64>,
    // Breaks ties between timers due at the same instant: first armed runs first.
    seq: u64,
}

#[derive(Default)]
struct TimerState {
    now_ms: u64,
    next_id: TimerId,
    next_seq: u64,
    entries: BTreeMap<TimerId, TimerEntry>,
}

impl TimerState {
    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    // Ids wrap around, skipping 0 and any id still in use.
    fn take_id(&mut self) -> TimerId {
        loop {
            self.next_id = self.next_id.wrapping_add(1);
            if self.next_id != 0 && !self.entries.contains_key(&self.next_id) {
                return self.next_id;
            }
        }
    }
}

fn clamp_delay(delay_ms: u64) -> u64 {
    if (1..=TIMEOUT_MAX_MS).contains(&delay_ms) {
        delay_ms
    } else {
        1
    }
}

/// Deterministic single-threaded scheduler backing the host timer functions.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<TimerState>>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TimerQueue")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.entries.len())
            .finish()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.state.borrow().now_ms
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn schedule(
        &self,
        kind: TimerKind,
        callback: JsValue,
        delay_ms: u64,
        args: Vec<JsValue>,
    ) -> Result<TimerId, ContextError> {
        let callback = match callback {
            JsValue::Object(o) if o.is_callable() => o,
            _ => {
                return Err(ContextError::InvalidArgument(
                    "callback must be a function".to_string(),
                ));
            }
        };
        let mut state = self.state.borrow_mut();
        let id = state.take_id();
        let seq = state.take_seq();
        let delay_ms = match kind {
            TimerKind::Immediate => 0,
            TimerKind::Timeout | TimerKind::Interval => clamp_delay(delay_ms),
        };
        let entry = TimerEntry {
            kind,
            callback,
            args,
            due_ms: state.now_ms.saturating_add(delay_ms),
            interval_ms: (kind == TimerKind::Interval).then_some(delay_ms),
            seq,
        };
        state.entries.insert(id, entry);
        debug!(id, ?kind, delay_ms, "timer scheduled");
        Ok(id)
    }

    /// Removes a timer. Returns false when the id is unknown or belongs to an
    /// unrelated kind (immediates are tracked apart from timeouts/intervals).
    pub fn cancel(&self, kind: TimerKind, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let matches = state
            .entries
            .get(&id)
            .is_some_and(|entry| entry.kind.shares_ids_with(kind));
        if matches {
            state.entries.remove(&id);
        }
        matches
    }

    /// Runs everything already due without moving the clock.
    pub fn run_pending(&self) -> Vec<ContextError> {
        self.advance(0)
    }

    /// Moves the clock forward by `ms`, running due callbacks in due-time
    /// order. Callback failures are logged and collected; they do not stop the
    /// remaining timers.
    ///
    /// Immediates queued by a callback during this call wait for the next
    /// call, so a callback that keeps re-queueing itself cannot stall the
    /// host.
    pub fn advance(&self, ms: u64) -> Vec<ContextError> {
        let target = self.now().saturating_add(ms);
        let cutoff = self.state.borrow().next_seq;
        let mut failures = Vec::new();
        while let Some((id, callback, args)) = self.pop_due(target, cutoff) {
            if let Err(err) = callback.call(&JsValue::Undefined, &args) {
                warn!(id, error = %err, "timer callback failed");
                failures.push(err);
            }
        }
        self.state.borrow_mut().now_ms = target;
        failures
    }

    fn pop_due(&self, target: u64, cutoff: u64) -> Option<(TimerId, JsObject, Vec<JsValue>)> {
        let mut state = self.state.borrow_mut();
        let id = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.due_ms <= target)
            .filter(|(_, entry)| entry.kind != TimerKind::Immediate || entry.seq <= cutoff)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.seq))
            .map(|(id, _)| *id)?;
        let seq = state.take_seq();
        let due_ms = state.entries.get(&id)?.due_ms;
        state.now_ms = state.now_ms.max(due_ms);

        let entry = state.entries.get_mut(&id)?;
        let fired = (id, entry.callback.clone(), entry.args.clone());
        let interval_ms = entry.interval_ms;
        match interval_ms {
            Some(interval) => {
                entry.due_ms = entry.due_ms.saturating_add(interval);
                entry.seq = seq;
            }
            None => {
                state.entries.remove(&id);
            }
        }
        Some(fired)
    }

    /// The host's own implementation of `op`, bound to this queue.
    pub fn host_function(&self, op: TimerOp) -> JsObject {
        let queue = self.clone();
        let func = match op {
            TimerOp::Schedule(kind) => {
                let arity = if kind == TimerKind::Immediate { 1 } else { 2 };
                JsFunction::native(op.name(), arity, move |_this, args| {
                    let callback = args.first().cloned().unwrap_or(JsValue::Undefined);
                    let (delay, rest) = match kind {
                        TimerKind::Immediate => (0, args.get(1..).unwrap_or_default()),
                        _ => (
                            delay_from(args.get(1)),
                            args.get(2..).unwrap_or_default(),
                        ),
                    };
                    let id = queue
                        .schedule(kind, callback, delay, rest.to_vec())
                        .map_err(|err| ContextError::InvalidArgument(format!("{op}: {err}")))?;
                    Ok(JsValue::Number(f64::from(id)))
                })
            }
            TimerOp::Cancel(kind) => JsFunction::native(op.name(), 1, move |_this, args| {
                if let Some(JsValue::Number(n)) = args.first()
                    && n.is_finite()
                    && *n >= 1.0
                    && *n <= f64::from(TimerId::MAX)
                {
                    queue.cancel(kind, *n as TimerId);
                }
                Ok(JsValue::Undefined)
            }),
        };
        JsObject::function(func)
    }
}

fn delay_from(value: Option<&JsValue>) -> u64 {
    let ms = value.map_or(0.0, JsValue::to_number);
    if ms.is_finite() && ms > 0.0 {
        ms as u64
    } else {
        0
    }
}

/// Wraps a real host timer function for exposure inside a context.
///
/// The wrapper forwards its arguments unchanged and returns whatever the real
/// function returns. Schedule variants refuse a non-callable first argument
/// before the host ever sees it, so a string can never reach a timer that
/// would compile it.
pub fn restricted_clone(op: TimerOp, real: JsObject) -> JsValue {
    let arity = match op {
        TimerOp::Schedule(TimerKind::Immediate) | TimerOp::Cancel(_) => 1,
        TimerOp::Schedule(_) => 2,
    };
    let func = JsFunction::native(op.name(), arity, move |this, args| {
        if matches!(op, TimerOp::Schedule(_))
            && !args.first().is_some_and(JsValue::is_callable)
        {
            return Err(ContextError::RequiresFunction {
                name: op.name().to_string(),
            });
        }
        real.call(this, args)
    });
    JsValue::Object(JsObject::function(func))
}
