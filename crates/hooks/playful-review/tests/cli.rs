use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

fn hook() -> Command {
    let mut cmd = Command::cargo_bin("playful-review").unwrap();
    cmd.env_remove("CODE_HOOK_DEBUG")
        .env_remove("LM_STUDIO_HOST")
        .env_remove("PLAYFUL_REVIEW_MODEL");
    cmd
}

fn write_event(path: &str, content: &str) -> String {
    json!({"tool_name": "Write", "tool_input": {"file_path": path, "content": content}}).to_string()
}

/// Answer one chat completion with `reply`, returning the request text.
fn fake_lm_studio(reply: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let body = json!({"choices": [{"message": {"role": "assistant", "content": reply}}]}).to_string();

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
        request
    });

    (url, handle)
}

#[test]
fn shell_scripts_are_out_of_scope() {
    hook()
        .write_stdin(write_event("/tmp/deploy.sh", "echo hi"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn manifests_are_out_of_scope() {
    hook()
        .write_stdin(write_event("/tmp/Dockerfile", "FROM x"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn rust_file_gets_playful_review() {
    let (url, server) = fake_lm_studio("Such a *gorgeous* match arm~");

    let assert = hook()
        .env("LM_STUDIO_HOST", &url)
        .env("PLAYFUL_REVIEW_MODEL", "test-model")
        .write_stdin(write_event("/src/main.rs", "fn main() {}"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let output: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(output["continue"], json!(true));
    assert_eq!(
        output["systemMessage"],
        json!("💋 Playful Code Review for main.rs:\n\nSuch a *gorgeous* match arm~")
    );

    let request = server.join().unwrap();
    assert!(request.contains(r#""model":"test-model""#));
    assert!(request.contains(r#""temperature":0.8"#));
}

#[test]
fn malformed_input_fails() {
    hook()
        .write_stdin("nope")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
