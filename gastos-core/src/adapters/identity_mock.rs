//! Mock Identity Toolkit server for testing
//!
//! Answers `POST /v1/accounts:lookup?key=...` the way the real service does:
//! - `{"users": [{"localId", "email"}]}` for tokens starting with `valid-`
//! - 400 with `INVALID_ID_TOKEN` for anything else
//! - 403 when the API key does not start with `test-`

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Mock identity server for testing
pub struct MockIdentityServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

#[derive(Debug, Clone, Default)]
pub struct MockIdentityConfig {
    /// Answer every request with a 500
    pub fail_server: bool,
}

impl MockIdentityServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockIdentityConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || handle_connection(stream, &cfg));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockIdentityServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read headers plus a body of `Content-Length` bytes
fn read_request(stream: &mut TcpStream) -> Option<String> {
    // Accepted sockets may inherit non-blocking mode
    stream.set_nonblocking(false).ok()?;
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    Some(String::from_utf8_lossy(&data).into_owned())
}

fn handle_connection(mut stream: TcpStream, config: &MockIdentityConfig) {
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    if config.fail_server {
        send_response(&mut stream, 500, "Internal Server Error", r#"{"error": {"code": 500}}"#);
        return;
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 || parts[0] != "POST" {
        send_response(&mut stream, 405, "Method Not Allowed", r#"{"error": {"code": 405}}"#);
        return;
    }

    let (path, query) = parts[1].split_once('?').unwrap_or((parts[1], ""));
    if path != "/v1/accounts:lookup" {
        send_response(&mut stream, 404, "Not Found", r#"{"error": {"code": 404}}"#);
        return;
    }

    let key_ok = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(k, v)| k == "key" && v.starts_with("test-"));
    if !key_ok {
        send_response(
            &mut stream,
            403,
            "Forbidden",
            r#"{"error": {"code": 403, "message": "API key not valid"}}"#,
        );
        return;
    }

    let body = request.split("\r\n\r\n").nth(1).unwrap_or("");
    let token = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["idToken"].as_str().map(str::to_string))
        .unwrap_or_default();

    match token.strip_prefix("valid-") {
        Some(name) => {
            let json = serde_json::json!({
                "kind": "identitytoolkit#GetAccountInfoResponse",
                "users": [{
                    "localId": format!("{}-uid", name),
                    "email": format!("{}@example.com", name),
                    "disabled": name == "disabled",
                }]
            });
            send_response(&mut stream, 200, "OK", &json.to_string());
        }
        None => send_response(
            &mut stream,
            400,
            "Bad Request",
            r#"{"error": {"code": 400, "message": "INVALID_ID_TOKEN"}}"#,
        ),
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
