//! Manager lifecycle states.

use std::fmt;

/// Where a [`MemoryManager`](crate::MemoryManager) is in its lifecycle.
///
/// ```text
/// Uninitialized ──init──▶ Active ──destroy──▶ Destroyed
///                          ▲  │                   │
///                          └──┴──init (reset)─────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Created but never initialized.
    Uninitialized,
    /// Accepting allocations, frees and queries.
    Active,
    /// Torn down by `destroy`; `init` reactivates it.
    Destroyed,
}

impl Lifecycle {
    /// Lower-case state name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Destroyed => "destroyed",
        }
    }

    /// Whether operations other than `init` are permitted.
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
