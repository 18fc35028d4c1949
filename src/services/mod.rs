//! Service layer for business logic
//!
//! Keeps input processing out of the HTTP handlers.

pub mod images;

pub use images::UploadedImage;
