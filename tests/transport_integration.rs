//! Integration tests for configured out-of-process drivers.
//!
//! The HTTP driver is exercised against a small hand-written responder on a
//! local TCP port; subprocess drivers are `sh -c` scripts (unix only).

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use uastd::{Catalog, CatalogError, Config, Dispatcher, ErrorKind, Language, Mode, Output, ParseRequest, Role};

fn lang(name: &str) -> Language {
    Language::resolve(name).unwrap()
}

const RUBY_TREE: &str = r#"{"status":"ok","tree":{"type":"program","start":{"offset":0,"line":1,"col":1},"end":{"offset":18,"line":1,"col":19},"children":[{"type":"call","start":{"offset":0,"line":1,"col":1},"end":{"offset":18,"line":1,"col":19},"children":[{"type":"identifier","token":"puts","start":{"offset":0,"line":1,"col":1},"end":{"offset":4,"line":1,"col":5}}]}]}}"#;

/// How the fake driver service answers `POST /parse`.
#[derive(Clone, Copy)]
enum Reply {
    Tree,
    Rejected,
    Garbage,
    ServerError,
}

/// Serve HTTP on a random local port until the test ends. Every connection
/// handles one request and is then closed.
async fn serve(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { return };
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let (status, body) = if request.starts_with("GET /health") {
                    ("200 OK", "{}".to_string())
                } else {
                    match reply {
                        Reply::Tree => ("200 OK", RUBY_TREE.to_string()),
                        Reply::Rejected => (
                            "400 Bad Request",
                            r#"{"status":"error","errors":["unexpected end of input"]}"#.to_string(),
                        ),
                        Reply::Garbage => ("200 OK", "<html>proxy error</html>".to_string()),
                        Reply::ServerError => ("503 Service Unavailable", "overloaded".to_string()),
                    }
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Read the request head and body (by Content-Length).
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let length = text[..head_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn http_config(url: &str) -> Config {
    let yaml = format!(
        "builtin_drivers: false\ndrivers:\n  - language: ruby\n    version: v2.9.0\n    transport: http\n    url: {}\n",
        url
    );
    let config = Config::parse_str(&yaml).unwrap();
    uastd::config::validate(&config).unwrap();
    config
}

async fn dispatcher(config: &Config) -> Dispatcher {
    let catalog = Arc::new(Catalog::new(Arc::new(config.provisioner().unwrap())));
    catalog.install(&lang("ruby"), None).await.unwrap();
    Dispatcher::new(catalog, config.classifier().unwrap())
}

#[tokio::test]
async fn test_http_driver_end_to_end() {
    let url = serve(Reply::Tree).await;
    let config = http_config(&url);
    let d = dispatcher(&config).await;

    let record = d.catalog().get(&lang("ruby")).unwrap();
    assert_eq!(record.version().as_str(), "v2.9.0");
    assert_eq!(record.endpoint().to_string(), url);

    let request = ParseRequest::inline("hello.rb", "puts \"Hello World\"").with_mode(Mode::Annotated);
    let response = d.dispatch(&request).await.unwrap();
    match response.output {
        Output::Tree(root) => {
            assert_eq!(root.kind, "program");
            assert!(root.has_role(Role::File));
            assert!(root.children[0].has_role(Role::Call));
            assert_eq!(root.children[0].children[0].token.as_deref(), Some("puts"));
        }
        Output::Matches(_) => panic!("expected a tree"),
    }
}

#[tokio::test]
async fn test_http_error_kinds() {
    let cases = [
        (Reply::Rejected, ErrorKind::DriverRejected),
        (Reply::Garbage, ErrorKind::DriverProtocol),
        (Reply::ServerError, ErrorKind::DriverUnavailable),
    ];
    for (reply, kind) in cases {
        let url = serve(reply).await;
        let d = dispatcher(&http_config(&url)).await;
        let err = d
            .dispatch(&ParseRequest::inline("hello.rb", "puts"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), kind, "{}", err);
    }
}

#[tokio::test]
async fn test_unreachable_driver_fails_install() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = http_config(&url);
    let catalog = Catalog::new(Arc::new(config.provisioner().unwrap()));
    let err = catalog.install(&lang("ruby"), None).await.unwrap_err();
    assert!(matches!(err, CatalogError::HealthCheckFailed { .. }), "{}", err);
    assert!(catalog.list().is_empty());
}

#[cfg(unix)]
mod process {
    use super::*;

    fn process_config(script: &str, single_flight: bool) -> Config {
        let yaml = format!(
            "builtin_drivers: false\ndrivers:\n  - language: ruby\n    version: 1.0.0\n    transport: process\n    command: [\"sh\", \"-c\", {:?}]\n    single_flight: {}\n",
            script, single_flight
        );
        let config = Config::parse_str(&yaml).unwrap();
        uastd::config::validate(&config).unwrap();
        config
    }

    #[tokio::test]
    async fn test_process_driver_end_to_end() {
        let script = format!("cat >/dev/null; printf '%s' '{}'", RUBY_TREE);
        let d = dispatcher(&process_config(&script, false)).await;

        let response = d
            .dispatch(&ParseRequest::inline("hello.rb", "puts \"Hello World\"").with_mode(Mode::Semantic))
            .await
            .unwrap();
        assert_eq!(response.version.as_str(), "v1.0.0");
        match response.output {
            Output::Tree(root) => {
                assert_eq!(root.kind, "file");
                assert_eq!(root.children[0].kind, "call");
            }
            Output::Matches(_) => panic!("expected a tree"),
        }
    }

    #[tokio::test]
    async fn test_timeout_keeps_record_usable() {
        let d = dispatcher(&process_config("cat >/dev/null; sleep 10", true)).await;
        let before = d.catalog().get(&lang("ruby")).unwrap();

        let request = ParseRequest::inline("hello.rb", "puts 1").with_timeout(Duration::from_millis(100));
        let err = d.dispatch(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverTimeout);
        assert!(err.is_transient());

        // Same record, still ready, and the single-flight gate was released.
        let after = d.catalog().get(&lang("ruby")).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        let err = d.dispatch(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverTimeout);
    }

    #[tokio::test]
    async fn test_rejection_reported_by_process() {
        let script = r#"cat >/dev/null; echo '{"status":"error","errors":["syntax error, unexpected end-of-input"]}'"#;
        let d = dispatcher(&process_config(script, false)).await;
        let err = d
            .dispatch(&ParseRequest::inline("hello.rb", "def"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverRejected);
        assert!(err.to_string().contains("unexpected end-of-input"));
    }
}
