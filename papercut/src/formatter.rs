use colored::*;
use papercut_core::{
    client::{CallError, METHOD_PREFIX},
    description::MethodDescriptor,
    xmlrpc::{client::XmlRpcError, codec::CodecError},
};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct MethodList(pub Vec<MethodDescriptor>);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<CallError<XmlRpcError>> for FormattedString {
    fn from(err: CallError<XmlRpcError>) -> Self {
        let title = match &err {
            CallError::UnknownMethod(_) => "Unknown Method:",
            CallError::Validation(_) => "Invalid Arguments:",
            CallError::Transport(XmlRpcError::Codec(CodecError::Fault { .. })) => "Server Fault:",
            CallError::Transport(_) => "Call Failed:",
        };
        FormattedString(format!("{}\n\n'{}'", title.red().bold(), err))
    }
}

impl From<XmlRpcError> for FormattedString {
    fn from(err: XmlRpcError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        FormattedString(format!("{}\n\n'{:#}'", "Error:".red().bold(), err))
    }
}

impl From<MethodList> for FormattedString {
    fn from(MethodList(methods): MethodList) -> Self {
        if methods.is_empty() {
            return FormattedString("No methods found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Methods:\n");
        for method in methods {
            out.push_str(&format!("  - {}\n", method.name.green()));
        }
        FormattedString(out.trim_end().to_string())
    }
}

impl From<&MethodDescriptor> for FormattedString {
    fn from(method: &MethodDescriptor) -> Self {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {{\n",
            "method".cyan(),
            method.name.green()
        ));
        out.push_str(&format!(
            "  // remote name: {}{}\n",
            METHOD_PREFIX, method.name
        ));
        out.push_str(&format!("  {}: {};\n", "token", "string".yellow()));

        for param in &method.parameters {
            out.push_str(&format!(
                "  {}: {};\n",
                param.name,
                param.kind.as_str().yellow()
            ));
        }
        out.push('}');
        FormattedString(out)
    }
}
