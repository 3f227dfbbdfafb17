//! Command Handlers

mod export_handlers;
mod project_handlers;
mod writing_handlers;

pub use export_handlers::ExportNovelHandler;
pub use project_handlers::{CreateProjectHandler, DeleteProjectHandler, UpdateProjectHandler};
pub use writing_handlers::{
    GenerateChapterHandler, GenerateOutlineHandler, GeneratePremiseHandler,
    StartWritingSessionHandler,
};
