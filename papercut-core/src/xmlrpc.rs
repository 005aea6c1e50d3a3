//! # XML-RPC Transport
//!
//! The default [`Transport`](crate::transport::Transport): XML-RPC over HTTP(S).
//!
//! The components here work with generic `serde_json::Value`s. The [`codec`] translates them
//! to and from XML-RPC documents on the fly, and the [`client`] ships those documents to the
//! endpoint with a shared `reqwest` client.
pub mod client;
pub mod codec;
