mod get_portfolio;
mod projects;
mod resumes;
mod stream_portfolio;
mod update_section;
mod upload;

pub use get_portfolio::get_portfolio_handler;
pub use projects::{create_project_handler, delete_project_handler, update_project_handler};
pub use resumes::{create_resume_handler, delete_resume_handler, update_resume_handler};
pub use stream_portfolio::stream_portfolio_handler;
pub use update_section::update_section_handler;
pub use upload::upload_handler;
