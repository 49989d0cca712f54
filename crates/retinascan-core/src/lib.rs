pub mod grade;
pub mod image;
pub mod record;

pub use grade::Grade;
pub use image::{ImageFormat, MAX_UPLOAD_BYTES};
pub use record::AnalysisResult;
