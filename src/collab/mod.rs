//! Portal-facing collaborators of the pipeline.
//!
//! Nothing in here reconciles anything: `auth` drives the login flow up to
//! an authenticated context, `extractor` turns log-page markup into
//! [`RawLogRow`](crate::models::raw_row::RawLogRow)s.

pub mod auth;
pub mod extractor;
