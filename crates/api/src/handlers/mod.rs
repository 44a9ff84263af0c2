//! Request handlers.
//!
//! Handlers delegate to the repositories in `portfolio_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod project;
