//! HTTP surface: index page, query route, visualization route.

pub mod handler;
pub mod server;

pub use server::{AppState, HttpServer};
