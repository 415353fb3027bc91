//! HTTP handlers

pub mod auth;
pub mod content;
pub mod create;
pub mod files;
pub mod password;
pub mod raw;
pub mod stream;
pub mod upload;
pub mod view;
