pub mod credentials;
pub mod upload;
