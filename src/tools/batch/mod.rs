//! Tools that work on many entries at once

mod batch_add_qa;
mod batch_delete_qa;
mod import_qa_file;

pub use batch_add_qa::BatchAddQaTool;
pub use batch_delete_qa::BatchDeleteQaTool;
pub use import_qa_file::ImportQaFileTool;
