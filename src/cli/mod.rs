//! Terminal views, routing and the interactive shell

pub mod commitments;
pub mod investors;
pub mod router;
pub mod setup;
pub mod shell;
pub mod ui;

pub use commitments::CommitmentsView;
pub use investors::InvestorsView;
pub use router::Route;
pub use shell::Shell;

/// Load lifecycle of a view: `Idle -> Loading -> Ready | Empty | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Empty,
    /// The request failed. Rendered like `Empty` with a notice.
    Failed,
}

impl Phase {
    fn loaded<T>(rows: &[T]) -> Self {
        if rows.is_empty() {
            Phase::Empty
        } else {
            Phase::Ready
        }
    }
}

const LOADING: &str = "Loading...";
const LOAD_FAILED: &str = "Could not load data; showing nothing.";
