pub mod row;

pub use row::{MergeOutcome, MergeRequest, MergedRow, Role, TableData};
