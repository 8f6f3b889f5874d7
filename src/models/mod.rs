// API request/response models

pub mod request;
pub mod response;

pub use request::TranslateRequest;
pub use response::{HealthResponse, ServiceInfo, TranslateResponse};
