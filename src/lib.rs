//! Quill - a minimal weblog
//!
//! A server-rendered blog with posts, comments and session-cookie
//! accounts, implemented in Rust.

pub mod auth;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, login, logout, register, validate_password, verify_password, LoginError,
    PasswordError, RegistrationError, RegistrationRequest, ValidationError,
};
pub use blog::{
    Comment, CommentRepository, NewComment, NewPost, Post, PostRepository, PostUpdate,
};
pub use config::Config;
pub use db::{Database, NewSession, NewUser, Session, SessionRepository, User, UserRepository};
pub use error::{QuillError, Result};
pub use web::{create_router, WebError, WebServer};
