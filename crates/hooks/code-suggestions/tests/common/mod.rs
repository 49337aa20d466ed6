//! Shared helpers for driving the hook binary.

use assert_cmd::Command;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// The hook binary with backend-related environment cleared.
pub fn hook() -> Command {
    let mut cmd = Command::cargo_bin("code-suggestions").unwrap();
    for var in [
        "CODE_HOOK_SERVICE",
        "CODE_HOOK_DEBUG",
        "OPENROUTER_API_KEY",
        "OPENROUTER_HOST",
        "OPENROUTER_MODEL",
        "LM_STUDIO_HOST",
        "LM_STUDIO_MODEL",
        "OLLAMA_HOST",
        "OLLAMA_MODEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// A port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Serves exactly one HTTP request with a canned JSON body.
pub struct FakeBackend {
    pub url: String,
    handle: JoinHandle<String>,
}

impl FakeBackend {
    pub fn start(body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8_lossy(&payload));

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
            request
        });

        Self { url, handle }
    }

    /// The request the hook sent.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}
