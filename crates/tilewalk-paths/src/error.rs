use std::fmt;

/// Why a path search produced no route.
///
/// Both variants are soft failures: a caller that re-plans periodically can
/// simply try again later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathError {
    /// The frontier was exhausted without reaching the goal, or the goal
    /// cannot be entered at all.
    NotFound,
    /// The expansion budget ran out before the search resolved.
    BudgetExceeded { expansions: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no path to goal"),
            Self::BudgetExceeded { expansions } => {
                write!(f, "search gave up after {expansions} expansions")
            }
        }
    }
}

impl std::error::Error for PathError {}
