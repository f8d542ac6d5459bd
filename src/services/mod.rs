pub mod classifier;
pub mod row_merger;
pub mod table_merger;

pub use classifier::{classify, is_answer_row, is_option_row, strip_leading_identifier};
pub use row_merger::merge_rows;
pub use table_merger::merge_tables;
