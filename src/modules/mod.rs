//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the data gateways, the file-backed fallback store and the photo bucket client.

pub mod gateway;
pub mod local_store;
pub mod storage;
