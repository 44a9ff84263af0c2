//! Domain types shared by the store, the HTTP service and the client.
//!
//! This crate has no I/O. It holds the project record and its drafts, the
//! error taxonomy, timestamp helpers and the list engine that derives the
//! displayed table from a fetched snapshot.

pub mod error;
pub mod listing;
pub mod project;
pub mod types;
