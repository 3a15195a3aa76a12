//! Placement strategy selectors.
//!
//! [`Placement`] names which free block satisfies an allocation request.
//! The selection algorithms themselves live in `memman-ledger`; this crate
//! only carries the selector so that every layer (engine, FFI, workloads)
//! can pass it around without depending on the ledger.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Which free block an allocation request is carved from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The lowest-addressed free block that is large enough.
    FirstFit,
    /// The largest free block; ties go to the lowest address.
    WorstFit,
    /// The smallest free block that is large enough; ties go to the
    /// lowest address.
    BestFit,
}

impl Placement {
    /// All strategies, in declaration order.
    pub const ALL: [Placement; 3] = [Placement::FirstFit, Placement::WorstFit, Placement::BestFit];

    /// Canonical kebab-case name (`"first-fit"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstFit => "first-fit",
            Self::WorstFit => "worst-fit",
            Self::BestFit => "best-fit",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known placement strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePlacementError {
    input: String,
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown placement strategy '{}' (expected first-fit, worst-fit or best-fit)",
            self.input
        )
    }
}

impl Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-fit" | "first_fit" | "firstfit" | "ff" => Ok(Self::FirstFit),
            "worst-fit" | "worst_fit" | "worstfit" | "wf" => Ok(Self::WorstFit),
            "best-fit" | "best_fit" | "bestfit" | "bf" => Ok(Self::BestFit),
            _ => Err(ParsePlacementError {
                input: s.to_owned(),
            }),
        }
    }
}
