//! End-to-end conversion with a local HTTP server standing in for the
//! diagram server: fetch-enabled documents get their image written to disk
//! and the block target rewritten to the stored basename.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use adoc_diagrams::{DiagramBlock, DiagramProcessor, DocumentAttributes};
use tempfile::TempDir;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

/// Serve `count` requests with a fixed response body, then stop.
fn serve(status_line: &'static str, body: &'static [u8], count: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for _ in 0..count {
            let (mut stream, _) = listener.accept().unwrap();

            // Drain the request head
            let mut buf = [0u8; 4096];
            let mut head = Vec::new();
            loop {
                let n = stream.read(&mut buf).unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let header = format!(
                "{status_line}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        }
    });

    format!("http://{addr}")
}

fn fetch_doc(server: &str, images_dir: &std::path::Path) -> DocumentAttributes {
    DocumentAttributes::new()
        .with("plantuml-server-url", server)
        .with("plantuml-fetch-diagram", "")
        .with("imagesoutdir", images_dir.to_str().unwrap())
}

#[test]
fn fetched_image_is_stored_and_target_rewritten() {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    let server = serve("HTTP/1.1 200 OK", PNG_BYTES, 1);

    let mut processor = DiagramProcessor::new();
    let attrs = HashMap::from([("target".to_owned(), "login-flow".to_owned())]);
    let doc = fetch_doc(&server, &images);

    let block = processor.process("plantuml", &attrs, "alice -> bob", &doc);

    let DiagramBlock::Image(image) = block else {
        panic!("expected image block");
    };
    assert_eq!(image.target, "login-flow.png");
    assert_eq!(image.alt, "login-flow");
    assert!(processor.warnings().is_empty());

    let stored = std::fs::read(images.join("login-flow.png")).unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[test]
fn fetched_image_without_target_gets_hashed_name() {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    let server = serve("HTTP/1.1 200 OK", PNG_BYTES, 1);

    let mut processor = DiagramProcessor::new();
    let doc = fetch_doc(&server, &images);

    let block = processor.process("plantuml", &HashMap::new(), "alice -> bob", &doc);

    let DiagramBlock::Image(image) = block else {
        panic!("expected image block");
    };
    assert!(image.target.starts_with("diag-"), "target: {}", image.target);
    assert!(image.target.ends_with(".png"));
    assert!(images.join(&image.target).exists());
}

#[test]
fn server_error_keeps_remote_url() {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    let server = serve("HTTP/1.1 500 Internal Server Error", b"boom", 1);

    let mut processor = DiagramProcessor::new();
    let doc = fetch_doc(&server, &images);

    let block = processor.process("plantuml", &HashMap::new(), "alice -> bob", &doc);

    let DiagramBlock::Image(image) = block else {
        panic!("expected image block");
    };
    assert!(image.target.starts_with(&server), "target: {}", image.target);
    assert_eq!(processor.warnings().len(), 1);
    assert!(processor.warnings()[0].contains("HTTP 500"));
    // Nothing written
    assert!(!images.exists());
}
