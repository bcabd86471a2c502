pub mod app;
pub mod deployment_steps;
pub mod image_modal;
pub mod project_links;
pub mod rich_text;
pub mod step_content;
pub mod workflow_animation;
