pub mod http_recognition_client;
