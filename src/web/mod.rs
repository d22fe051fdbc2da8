//! Web interface module for Quill.
//!
//! This module provides the server-rendered HTML interface: post
//! pages, comment forms and account flows with session-cookie
//! authentication.

pub mod error;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod server;

pub use error::WebError;
pub use router::create_router;
pub use server::WebServer;
