pub mod face_image;
pub mod http_backend;
