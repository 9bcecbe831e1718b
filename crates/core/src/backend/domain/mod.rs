pub mod backend_error;
pub mod recognition_backend;
