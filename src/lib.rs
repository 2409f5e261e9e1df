//! Kana recognition quiz: the catalog, question generation and session state
//! machine, plus the axum host that serves them over HTTP and WebSocket.

pub mod catalog;
pub mod config;
pub mod error;
pub mod kana;
pub mod logic;
pub mod protocol;
pub mod question;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod telemetry;
