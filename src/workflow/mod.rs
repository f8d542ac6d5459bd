pub mod merge_flow;
pub mod merge_state;

pub use merge_flow::{MergeFlow, StatusSink};
pub use merge_state::{MergeSession, MergeState};
