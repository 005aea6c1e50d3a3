use papercut_core::client::{CallError, Client, ConnectionConfig, ValidationErrorKind};
use papercut_core::description::ApiDescription;
use papercut_core::xmlrpc::client::{XmlRpcError, XmlRpcTransport};
use papercut_core::xmlrpc::codec::CodecError;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const BALANCE_RESPONSE: &str = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><double>12.5</double></value></param></params></methodResponse>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
<member><name>faultCode</name><value><int>1</int></value></member>
<member><name>faultString</name><value><string>User does not exist</string></value></member>
</struct></value></fault></methodResponse>"#;

// Accepts a single HTTP connection, answers it with the given status and body,
// and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request body was complete");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&buf[..header_end + content_length]).to_string()
    });

    (port, handle)
}

fn setup_client(port: u16) -> Client {
    let config = ConnectionConfig::new("127.0.0.1", port).with_security(false);
    Client::new(&config, "test-token", ApiDescription::bundled().unwrap()).unwrap()
}

#[tokio::test]
async fn test_successful_call() {
    let (port, server) = serve_once("200 OK", BALANCE_RESPONSE).await;
    let client = setup_client(port);

    let balance = client
        .call("getUserAccountBalance", vec![json!("alice")])
        .await
        .unwrap();

    assert_eq!(balance, json!(12.5));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /rpc/api/xmlrpc HTTP/1.1"));
    assert!(request.contains("<methodName>api.getUserAccountBalance</methodName>"));
    assert!(request.contains("test-token"));
    assert!(request.contains("alice"));
    assert!(
        request.find("test-token").unwrap() < request.find("alice").unwrap(),
        "the token must be the first argument"
    );
}

#[tokio::test]
async fn test_http_error_status() {
    let (port, server) = serve_once("500 Internal Server Error", "").await;
    let client = setup_client(port);

    let result = client.call("isUserExists", vec![json!("alice")]).await;

    match result {
        Err(CallError::Transport(XmlRpcError::Status(status))) => {
            assert_eq!(status.as_u16(), 500)
        }
        other => panic!("Expected an HTTP status error, got {other:?}"),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn test_remote_fault() {
    let (port, server) = serve_once("200 OK", FAULT_RESPONSE).await;
    let client = setup_client(port);

    let result = client.call("isUserExists", vec![json!("ghost")]).await;

    match result {
        Err(CallError::Transport(XmlRpcError::Codec(CodecError::Fault { code, message }))) => {
            assert_eq!(code, 1);
            assert_eq!(message, "User does not exist");
        }
        other => panic!("Expected a server fault, got {other:?}"),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn test_validation_happens_before_connecting() {
    // Nothing listens on this port: a connection attempt would fail with a transport error.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = setup_client(port);
    let result = client
        .call("adjustUserAccountBalance", vec![json!("alice"), json!("lots")])
        .await;

    match result {
        Err(CallError::Validation(err)) => {
            assert_eq!(err.parameter, "adjustment");
            assert_eq!(err.kind, ValidationErrorKind::NotAFloat);
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = setup_client(port);
    let result = client.call("isUserExists", vec![json!("alice")]).await;

    assert!(matches!(
        result,
        Err(CallError::Transport(XmlRpcError::Http(_)))
    ));
}

#[test]
fn test_endpoint_url() {
    let config = ConnectionConfig::new("print.example.com", 9192);
    let transport = XmlRpcTransport::new(&config).unwrap();
    assert_eq!(
        transport.url().as_str(),
        "https://print.example.com:9192/rpc/api/xmlrpc"
    );

    let config = ConnectionConfig::new("localhost", 9191)
        .with_path("custom/xmlrpc")
        .with_security(false);
    assert_eq!(config.url(), "http://localhost:9191/custom/xmlrpc");
}

#[test]
fn test_invalid_host() {
    let config = ConnectionConfig::new("not a host", 9192);
    assert!(matches!(
        XmlRpcTransport::new(&config),
        Err(XmlRpcError::InvalidUrl { .. })
    ));
}

#[test]
fn test_connection_config_defaults() {
    let config: ConnectionConfig =
        serde_json::from_value(json!({ "host": "localhost", "port": 9192 })).unwrap();

    assert_eq!(config, ConnectionConfig::new("localhost", 9192));
    assert_eq!(config.path, "/rpc/api/xmlrpc");
    assert!(config.security);
}
