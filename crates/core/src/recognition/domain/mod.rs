pub mod enrollment;
pub mod recognition_client;
pub mod recognition_result;
