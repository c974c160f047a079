//! Options controlling which roots a context is built from.

use std::collections::BTreeSet;

use crate::capability::RootKind;

/// Which ambient roots to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootSelection {
    pub server: bool,
    pub browser: bool,
}

impl RootSelection {
    pub const ALL: RootSelection = RootSelection {
        server: true,
        browser: true,
    };

    pub const NONE: RootSelection = RootSelection {
        server: false,
        browser: false,
    };

    pub const fn only(kind: RootKind) -> Self {
        match kind {
            RootKind::Server => RootSelection {
                server: true,
                browser: false,
            },
            RootKind::Browser => RootSelection {
                server: false,
                browser: true,
            },
        }
    }

    /// Every root compiled into this build.
    pub const fn compiled() -> Self {
        RootSelection {
            server: RootKind::Server.is_compiled_in(),
            browser: RootKind::Browser.is_compiled_in(),
        }
    }

    pub const fn includes(self, kind: RootKind) -> bool {
        match kind {
            RootKind::Server => self.server,
            RootKind::Browser => self.browser,
        }
    }
}

impl Default for RootSelection {
    fn default() -> Self {
        Self::compiled()
    }
}

/// Construction options for [`create_context_with`](crate::create_context_with).
///
/// ```
/// use jsse_context::{ContextConfig, RootKind, RootSelection};
///
/// let config = ContextConfig::new()
///     .with_roots(RootSelection::only(RootKind::Server))
///     .deny("Deno");
/// assert!(!config.roots().includes(RootKind::Browser));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    roots: RootSelection,
    extra_denied: BTreeSet<String>,
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_roots(mut self, roots: RootSelection) -> Self {
        self.roots = roots;
        self
    }

    /// Adds a name to the fixed deny-list for contexts built with this
    /// configuration.
    #[must_use]
    pub fn deny(mut self, name: impl Into<String>) -> Self {
        self.extra_denied.insert(name.into());
        self
    }

    pub fn roots(&self) -> RootSelection {
        self.roots
    }

    pub fn extra_denied(&self) -> impl Iterator<Item = &str> {
        self.extra_denied.iter().map(String::as_str)
    }
}
