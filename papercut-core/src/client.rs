//! # Papercut Client
//!
//! This module implements the facade that turns an [`ApiDescription`] into callable methods.
//!
//! A [`Client`] owns a [`Transport`] and the authentication token. For every descriptor in
//! the description it registers one generated [`Method`] under the descriptor's name. A
//! generated method validates its positional arguments (see [`validation`]) and only then
//! forwards the call as `api.<name>(token, args...)`.
//!
//! ## Overloads
//!
//! The remote API overloads some method names. Only the **first** descriptor for a given
//! name is registered; later descriptors with the same name are ignored.
//!
//! ## Example
//!
//! ```rust,no_run
//! use papercut_core::client::{Client, ConnectionConfig};
//! use papercut_core::description::ApiDescription;
//! use papercut_core::serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::new("localhost", 9192);
//! let client = Client::new(&config, "my-token", ApiDescription::bundled()?)?;
//!
//! let balance = client
//!     .call("getUserAccountBalance", vec![json!("alice")])
//!     .await?;
//! # Ok(())
//! # }
//! ```
mod types;
pub mod validation;

pub use types::*;
pub use validation::{ValidationError, ValidationErrorKind};

use crate::{
    description::{ApiDescription, MethodDescriptor},
    transport::Transport,
    xmlrpc::client::{XmlRpcError, XmlRpcTransport},
};
use serde_json::Value;
use std::{collections::HashMap, fmt};

/// Namespace prefix of every remote method.
pub const METHOD_PREFIX: &str = "api.";

/// Errors that can occur when calling a generated method.
#[derive(Debug, thiserror::Error)]
pub enum CallError<E> {
    #[error("Method '{0}' not found")]
    UnknownMethod(String),
    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationError),
    /// The transport failed. The error is the one returned by the transport, untouched.
    #[error(transparent)]
    Transport(E),
}

/// The dynamic client facade.
///
/// The generic parameter `T` is the transport used to reach the remote service.
#[derive(Clone)]
pub struct Client<T = XmlRpcTransport> {
    transport: T,
    token: String,
    /// Registered descriptors, in description order, one per name.
    methods: Vec<MethodDescriptor>,
    index: HashMap<String, usize>,
}

impl Client<XmlRpcTransport> {
    /// Creates a client talking XML-RPC to the endpoint described by `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Host, port, path and security flag of the endpoint.
    /// * `token` - Authentication token, sent as the first argument of every call.
    /// * `description` - The methods to expose.
    ///
    /// # Returns
    ///
    /// * `Ok(Client)` - The client. No connection is opened until the first call.
    /// * `Err(XmlRpcError)` - If the endpoint URL is invalid or the HTTP client cannot be built.
    pub fn new(
        config: &ConnectionConfig,
        token: impl Into<String>,
        description: ApiDescription,
    ) -> Result<Self, XmlRpcError> {
        let transport = XmlRpcTransport::new(config)?;
        Ok(Self::with_transport(transport, token, description))
    }
}

/// Transport placeholder for a client that is **not connected** to any server.
///
/// An offline client can list and describe its methods, and validate arguments, but it
/// cannot perform calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Client<Offline> {
    /// Creates a client that only exposes the methods of `description` for introspection.
    pub fn offline(description: ApiDescription) -> Self {
        Self::with_transport(Offline, String::new(), description)
    }
}

impl<T> Client<T> {
    /// Creates a client on top of an existing transport.
    pub fn with_transport(
        transport: T,
        token: impl Into<String>,
        description: ApiDescription,
    ) -> Self {
        let mut methods = Vec::with_capacity(description.len());
        let mut index = HashMap::with_capacity(description.len());

        for descriptor in description {
            if index.contains_key(&descriptor.name) {
                tracing::debug!(method = %descriptor.name, "skipping overloaded method descriptor");
                continue;
            }
            index.insert(descriptor.name.clone(), methods.len());
            methods.push(descriptor);
        }

        Self {
            transport,
            token: token.into(),
            methods,
            index,
        }
    }

    /// The registered method descriptors, in description order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up the generated method registered under `name`.
    pub fn method(&self, name: &str) -> Option<Method<'_, T>> {
        let descriptor = &self.methods[*self.index.get(name)?];
        Some(Method {
            client: self,
            descriptor,
        })
    }
}

impl<T: Transport> Client<T> {
    /// Invokes `api.<method>` with the token prepended to `params`.
    ///
    /// No validation happens here; prefer [`Client::call`] or [`Method::call`].
    pub async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value, T::Error> {
        let qualified = format!("{METHOD_PREFIX}{method}");

        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(Value::String(self.token.clone()));
        args.extend(params);

        tracing::debug!(method = %qualified, arguments = args.len() - 1, "invoking remote method");

        self.transport.invoke(&qualified, args).await
    }

    /// Validates `args` against the method registered under `name` and performs the call.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw result returned by the remote method.
    /// * `Err(CallError::UnknownMethod)` - No method is registered under `name`.
    /// * `Err(CallError::Validation)` - An argument was rejected; nothing was sent.
    /// * `Err(CallError::Transport)` - The remote call failed.
    pub async fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, CallError<T::Error>> {
        let method = self
            .method(name)
            .ok_or_else(|| CallError::UnknownMethod(name.to_string()))?;

        method.call(args).await
    }
}

impl<T> fmt::Debug for Client<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("token", &"<redacted>")
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// A generated method: one [`MethodDescriptor`] bound to the [`Client`] that registered it.
pub struct Method<'a, T> {
    client: &'a Client<T>,
    descriptor: &'a MethodDescriptor,
}

impl<'a, T> Method<'a, T> {
    pub fn name(&self) -> &'a str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &'a MethodDescriptor {
        self.descriptor
    }

    /// Checks `args` against the descriptor and returns the coerced argument list.
    pub fn validate(&self, args: Vec<Value>) -> Result<Vec<Value>, ValidationError> {
        validation::validate_arguments(&self.descriptor.parameters, args)
    }
}

impl<T: Transport> Method<'_, T> {
    /// Validates `args` and, if they are all valid, performs the remote call.
    pub async fn call(&self, args: Vec<Value>) -> Result<Value, CallError<T::Error>> {
        let args = self.validate(args).inspect_err(|err| {
            tracing::debug!(method = %self.descriptor.name, error = %err, "rejected arguments");
        })?;

        self.client
            .invoke(&self.descriptor.name, args)
            .await
            .map_err(CallError::Transport)
    }
}

impl<T> Clone for Method<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Method<'_, T> {}
