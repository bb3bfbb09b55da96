#[cfg(test)]
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::fs;
#[cfg(test)]
use std::io::{Read, Write};
#[cfg(test)]
use std::net::TcpListener;
#[cfg(test)]
use std::path::Path;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::thread;
#[cfg(test)]
use std::time::Duration;

/// Transport serving canned responses keyed by exact URL.
///
/// Unknown URLs fail like an unreachable host. Every request is recorded so
/// tests can assert on ordering and headers.
#[cfg(test)]
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[cfg(test)]
impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), HttpResponse::new(status, body));
        self
    }

    pub fn respond_with_file(self, url: &str, fixture: &str) -> Self {
        let body = fs::read_to_string(Path::new("testdata").join(fixture))
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture, e));
        self.respond(url, 200, &body)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Transport for StubTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .get(&request.url)
            .map(|response| {
                if request.status_only {
                    HttpResponse::new(response.status, "")
                } else {
                    response.clone()
                }
            })
            .ok_or_else(|| TransportError::Network {
                url: request.url.clone(),
                message: "connection refused".to_string(),
            })
    }
}

/// Serves one connection: a 200 status line promising a large body, a few
/// bytes of it, then silence. Returns the server's base URL.
#[cfg(test)]
pub fn stalled_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\n\r\n<html>");
            let _ = stream.flush();
            thread::sleep(Duration::from_secs(5));
        }
    });

    format!("http://{}", addr)
}
