//! # Transport Capability
//!
//! The single capability the [`Client`](crate::client::Client) facade needs from the
//! outside world: invoke a remote method by its (fully qualified) name with an ordered
//! list of arguments.
//!
//! The facade never interprets transport errors. Whatever the transport fails with is
//! handed back to the caller unchanged, wrapped in
//! [`CallError::Transport`](crate::client::CallError::Transport).
use serde_json::Value;
use std::future::Future;

pub trait Transport: Send + Sync {
    /// The error surfaced when a remote call fails (connection failure, remote fault, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Performs a remote call and completes with the raw result payload.
    ///
    /// # Arguments
    ///
    /// * `method` - The qualified remote method name (e.g. `api.getUserAccountBalance`).
    /// * `params` - The full positional argument list, authentication token included.
    fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    type Error = T::Error;

    fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        (**self).invoke(method, params)
    }
}
