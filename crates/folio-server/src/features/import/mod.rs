pub mod commands;
pub mod routes;

pub use commands::{
    gallery::{GalleryImportRequest, ImportGalleryCommand},
    videos::ImportVideosCommand,
    ImportResponse,
};
pub use routes::import_routes;
