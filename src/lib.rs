//! Longform - Article retrieval and rendering
//!
//! This crate resolves article slugs, fetches content records from a remote
//! store and compiles their markup (code blocks, math, tables, footnotes)
//! into a typed render tree served over HTTP.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
