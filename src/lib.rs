pub mod badges_config;
pub mod comment;
pub mod errors;
pub mod github;
pub mod render;
