pub mod image_adapter;
pub mod s3_adapter;
pub mod s3_event;
