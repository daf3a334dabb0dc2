pub mod application;
pub mod error;
pub mod http;
pub mod playvox;
