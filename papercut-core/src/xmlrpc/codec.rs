//! # JSON <-> XML-RPC Codec
//!
//! Bridges `serde_json::Value` and XML-RPC documents, so callers never deal with XML.
//!
//! 1. **Requests (JSON -> XML-RPC)**: every argument is mapped onto an XML-RPC value
//!    (integers that fit 32 bits become `<int>`, larger ones `<i8>`, floats `<double>`,
//!    objects `<struct>`, `null` becomes `<nil/>`) and the list is rendered as a `methodCall`.
//! 2. **Responses (XML-RPC -> JSON)**: the single `methodResponse` parameter is deserialized
//!    straight into a `serde_json::Value`. A `<fault>` response becomes [`CodecError::Fault`]
//!    carrying the server's code and message; anything unparsable is [`CodecError::Decode`].
use serde_json::{Number, Value};
use serde_xmlrpc::Value as XmlRpcValue;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode XML-RPC request: '{0}'")]
    Encode(#[source] serde_xmlrpc::Error),
    #[error("Failed to decode XML-RPC response: '{0}'")]
    Decode(#[source] serde_xmlrpc::Error),
    #[error("Server fault {code}: '{message}'")]
    Fault { code: i32, message: String },
}

/// Renders a `methodCall` document for `method` with the given arguments.
pub fn encode_request(method: &str, params: Vec<Value>) -> Result<String, CodecError> {
    let args = params.into_iter().map(to_xmlrpc).collect();
    serde_xmlrpc::request_to_string(method, args).map_err(CodecError::Encode)
}

/// Parses a `methodResponse` document into its result value.
pub fn decode_response(body: &str) -> Result<Value, CodecError> {
    serde_xmlrpc::response_from_str(body).map_err(|err| match err {
        serde_xmlrpc::Error::Fault(fault) => CodecError::Fault {
            code: fault.fault_code,
            message: fault.fault_string,
        },
        other => CodecError::Decode(other),
    })
}

/// Maps a JSON value onto the closest XML-RPC value.
pub fn to_xmlrpc(value: Value) -> XmlRpcValue {
    match value {
        Value::Null => XmlRpcValue::Nil,
        Value::Bool(b) => XmlRpcValue::Bool(b),
        Value::Number(n) => number_to_xmlrpc(&n),
        Value::String(s) => XmlRpcValue::String(s),
        Value::Array(items) => XmlRpcValue::Array(items.into_iter().map(to_xmlrpc).collect()),
        Value::Object(fields) => XmlRpcValue::Struct(
            fields
                .into_iter()
                .map(|(name, value)| (name, to_xmlrpc(value)))
                .collect(),
        ),
    }
}

fn number_to_xmlrpc(n: &Number) -> XmlRpcValue {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => XmlRpcValue::Int(small),
            Err(_) => XmlRpcValue::Int64(i),
        };
    }

    // Only integers above i64::MAX get here, or floats.
    XmlRpcValue::Double(n.as_f64().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pick_the_narrowest_xmlrpc_type() {
        assert!(matches!(to_xmlrpc(json!(7)), XmlRpcValue::Int(7)));
        assert!(matches!(to_xmlrpc(json!(-7)), XmlRpcValue::Int(-7)));
        assert!(matches!(
            to_xmlrpc(json!(5_000_000_000i64)),
            XmlRpcValue::Int64(5_000_000_000)
        ));
        assert!(matches!(to_xmlrpc(json!(1.0)), XmlRpcValue::Double(v) if v == 1.0));
    }

    #[test]
    fn containers_are_mapped_recursively() {
        match to_xmlrpc(json!(["a", { "n": null }])) {
            XmlRpcValue::Array(items) => {
                assert!(matches!(&items[0], XmlRpcValue::String(s) if s == "a"));
                assert!(matches!(&items[1], XmlRpcValue::Struct(_)));
            }
            other => panic!("Expected an array, got {other:?}"),
        }
    }

    #[test]
    fn request_carries_method_name_and_arguments() {
        let xml = encode_request(
            "api.getUserAccountBalance",
            vec![json!("secret-token"), json!("alice")],
        )
        .unwrap();

        assert!(xml.contains("<methodName>api.getUserAccountBalance</methodName>"));
        assert!(xml.contains("secret-token"));
        assert!(xml.contains("alice"));
    }

    #[test]
    fn decodes_scalar_and_struct_responses() {
        let double = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><double>12.5</double></value></param></params></methodResponse>"#;
        assert_eq!(decode_response(double).unwrap(), json!(12.5));

        let structure = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><struct>
<member><name>userName</name><value><string>alice</string></value></member>
<member><name>jobs</name><value><int>3</int></value></member>
</struct></value></param></params></methodResponse>"#;
        assert_eq!(
            decode_response(structure).unwrap(),
            json!({ "userName": "alice", "jobs": 3 })
        );
    }

    #[test]
    fn fault_responses_carry_code_and_message() {
        let fault = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
<member><name>faultCode</name><value><int>1</int></value></member>
<member><name>faultString</name><value><string>User does not exist</string></value></member>
</struct></value></fault></methodResponse>"#;

        match decode_response(fault) {
            Err(CodecError::Fault { code, message }) => {
                assert_eq!(code, 1);
                assert_eq!(message, "User does not exist");
            }
            other => panic!("Expected a server fault, got {other:?}"),
        }
    }

    #[test]
    fn malformed_responses_are_decode_errors() {
        assert!(matches!(
            decode_response("<html><body>Not Found</body></html>"),
            Err(CodecError::Decode(_))
        ));
    }
}
