//! Row models and input DTOs for the document-store tables.

pub mod app_rating;
pub mod movie;
pub mod review;
