//! Driftwood - A personal blog and portfolio site
//!
//! This library provides the core functionality for the Driftwood site:
//! a published-posts blog with moderated comments and an About page that
//! accepts collaboration requests.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod theme;
