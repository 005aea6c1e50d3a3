//! # Papercut Core
//!
//! `papercut-core` is the library behind the `papercut` CLI. It provides a dynamic
//! XML-RPC client that exposes one callable per entry of an API description,
//! without compile-time knowledge of the remote methods.
//!
//! ## Key Components
//!
//! * **[`ApiDescription`](description::ApiDescription):** The ordered list of remote methods
//!   and their typed parameters, loaded from a JSON description artifact.
//! * **[`Client`](client::Client):** The facade. It owns a transport handle and the
//!   authentication token, and hands out one [`Method`](client::Method) per described method.
//! * **[`Method`](client::Method):** A generated method. It validates and coerces its
//!   positional arguments client-side before forwarding the call.
//!
//! ## Transports
//!
//! The facade only needs a [`Transport`](transport::Transport): something that can invoke a
//! remote method by name with a list of arguments. The default one,
//! [`XmlRpcTransport`](xmlrpc::client::XmlRpcTransport), speaks XML-RPC over HTTP(S).
//!
//! Arguments and results are plain `serde_json::Value`s in both directions.
//!
//! ## Re-exports
//!
//! This crate re-exports `serde_json` so that consumers build argument lists with a
//! compatible version.
pub mod client;
pub mod description;
pub mod transport;
pub mod xmlrpc;

// Re-exports
pub use serde_json;
