//! Single-entry tools: querying, creating, editing and reading entries

mod add_qa;
mod add_similar_question;
mod delete_qa;
mod get_qa;
mod list_qa;
mod query_answer;
mod set_category;
mod update_qa;

pub use add_qa::AddQaTool;
pub use add_similar_question::AddSimilarQuestionTool;
pub use delete_qa::DeleteQaTool;
pub use get_qa::GetQaTool;
pub use list_qa::ListQaTool;
pub use query_answer::QueryAnswerTool;
pub use set_category::SetCategoryTool;
pub use update_qa::UpdateQaTool;
