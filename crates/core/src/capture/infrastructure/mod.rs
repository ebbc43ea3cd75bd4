pub mod camera_source;
pub mod jpeg_data_url;
