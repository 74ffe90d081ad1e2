pub mod application;
pub mod response;
