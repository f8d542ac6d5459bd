pub mod docx_reader;
pub mod docx_writer;

pub use docx_reader::{extract_tables, load_tables, parse_docx};
pub use docx_writer::{render_docx, save_docx};
