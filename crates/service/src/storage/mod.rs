//! Storage helpers for the service layer.
//!
//! File-backed JSON documents for deployments that do not warrant a database.

pub mod json_document_store;
