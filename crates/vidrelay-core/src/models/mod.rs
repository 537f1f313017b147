pub mod upload;
pub mod visibility;

pub use upload::{UploadResponse, UploadResult, UploadRouteStatus};
pub use visibility::Visibility;
