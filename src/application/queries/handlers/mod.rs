//! Query Handlers

mod analytics_handlers;
mod project_query_handlers;

pub use analytics_handlers::AnalyzeProjectHandler;
pub use project_query_handlers::{GetProjectHandler, ListProjectsHandler};
