//! # API Description
//!
//! The data model of the remote API: an ordered list of [`MethodDescriptor`]s, each naming
//! a remote method and its positional, typed parameters.
//!
//! The description artifact is a JSON array:
//!
//! ```json
//! [
//!   {
//!     "name": "adjustUserAccountBalance",
//!     "parameters": [
//!       { "name": "userName", "type": "string" },
//!       { "name": "adjustment", "type": "double" },
//!       { "name": "comment", "type": "string" }
//!     ]
//!   }
//! ]
//! ```
//!
//! The order of the entries matters: when two entries share a name, only the first one is
//! turned into a callable method (see [`crate::client`]).
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

/// The API description bundled with this crate.
pub const BUNDLED_API_DESCRIPTION: &str = include_str!("../api.json");

#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("Failed to read API description: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse API description: '{0}'")]
    Parse(#[from] serde_json::Error),
}

/// The declared type of a parameter.
///
/// Recognised tags get a dedicated coercion rule. Any other tag is kept verbatim in
/// [`ParamType::Other`] and validated as an exact match against the runtime type name of
/// the argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    Array,
    Double,
    Int,
    Boolean,
    String,
    Other(String),
}

impl ParamType {
    /// The tag used for this type in the description artifact.
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::Array => "array",
            ParamType::Double => "double",
            ParamType::Int => "int",
            ParamType::Boolean => "boolean",
            ParamType::String => "string",
            ParamType::Other(tag) => tag,
        }
    }
}

impl From<String> for ParamType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "array" => ParamType::Array,
            "double" => ParamType::Double,
            "int" => ParamType::Int,
            "boolean" => ParamType::Boolean,
            "string" => ParamType::String,
            _ => ParamType::Other(tag),
        }
    }
}

impl From<&str> for ParamType {
    fn from(tag: &str) -> Self {
        ParamType::from(tag.to_string())
    }
}

impl From<ParamType> for String {
    fn from(kind: ParamType) -> Self {
        match kind {
            ParamType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single positional parameter of a remote method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, kind: impl Into<ParamType>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A remote method and its ordered parameter list.
///
/// The authentication token is not part of the parameter list: the client prepends it to
/// every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// The ordered sequence of method descriptors making up a remote API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiDescription {
    methods: Vec<MethodDescriptor>,
}

impl ApiDescription {
    pub fn new(methods: Vec<MethodDescriptor>) -> Self {
        Self { methods }
    }

    /// Parses the description bundled with this crate.
    pub fn bundled() -> Result<Self, DescriptionError> {
        Self::from_json_str(BUNDLED_API_DESCRIPTION)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Reads and parses a description file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    /// Iterates over the descriptors in source order, duplicates included.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl From<Vec<MethodDescriptor>> for ApiDescription {
    fn from(methods: Vec<MethodDescriptor>) -> Self {
        Self::new(methods)
    }
}

impl IntoIterator for ApiDescription {
    type Item = MethodDescriptor;
    type IntoIter = std::vec::IntoIter<MethodDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}
