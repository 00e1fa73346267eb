#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use wizard_core::{ApiClient, ApiConfig};

/// What the scripted backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct ScriptedBackend {
    pub base_url: String,
    requests: Receiver<RecordedRequest>,
    _join_handle: JoinHandle<()>,
}

impl ScriptedBackend {
    /// Serve `responses` in order, one per connection, then stop.
    pub fn start(responses: Vec<(u16, &'static str, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let base_url = format!("http://{}/api", listener.local_addr().expect("local addr"));
        let (tx, rx) = mpsc::channel();

        let join_handle = thread::spawn(move || {
            for (status, content_type, body) in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                if let Some(req) = read_request(&mut stream) {
                    let _ = tx.send(req);
                }
                write_response(&mut stream, status, content_type, &body);
            }
        });

        Self {
            base_url,
            requests: rx,
            _join_handle: join_handle,
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::start(vec![(status, "application/json", body.to_string())])
    }

    pub fn client(&self) -> ApiClient {
        let cfg = ApiConfig::with_base_url(&self.base_url).expect("valid base url");
        ApiClient::new(cfg).expect("client")
    }

    pub fn next_request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("backend saw a request")
    }
}

/// Base URL of a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api")
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|w| w == b"\r\n\r\n")
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    stream.set_read_timeout(Some(Duration::from_secs(2))).ok()?;

    let mut bytes = Vec::new();
    let mut buf = [0_u8; 4096];
    let mut header_end = None;
    let mut content_length = 0_usize;

    loop {
        let read = stream.read(&mut buf).ok()?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&buf[..read]);

        if header_end.is_none() {
            if let Some(pos) = find_header_end(&bytes) {
                header_end = Some(pos + 4);
                let head = String::from_utf8_lossy(&bytes[..pos]).to_string();
                for line in head.lines() {
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap_or(0);
                        }
                    }
                }
            }
        }

        if let Some(end) = header_end {
            if bytes.len() >= end + content_length {
                break;
            }
        }
    }

    let end = header_end?;
    let head = String::from_utf8_lossy(&bytes[..end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let content_type = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("content-type")
            .then(|| value.trim().to_string())
    });

    let body_end = (end + content_length).min(bytes.len());
    let body = String::from_utf8_lossy(&bytes[end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        content_type,
        body,
    })
}

fn write_response(stream: &mut TcpStream, status: u16, content_type: &str, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let payload = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(payload.as_bytes());
    let _ = stream.flush();
}
