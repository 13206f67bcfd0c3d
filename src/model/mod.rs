pub mod quote;
pub mod uploaded_file;

pub use quote::QuoteSubmission;
pub use uploaded_file::UploadedFile;
