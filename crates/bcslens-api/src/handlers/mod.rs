pub mod photo_download;
pub mod photo_upload;

pub use photo_download::download_photo;
pub use photo_upload::upload_photo;
