pub mod admin;
pub mod legacy_upload;
pub mod media;
pub mod media_upload;
pub mod model_upload;
pub mod models;
