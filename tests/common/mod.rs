#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use async_trait::async_trait;
use lopdf::Document as LopdfDocument;
use medreport::{AdvisoryError, AdvisoryProvider, ReportAssembler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An assembler with a fixed header date so runs are comparable.
pub fn assembler() -> ReportAssembler {
    ReportAssembler::new("Medical Diagnostic Report")
        .with_report_date(chrono::NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date"))
}

pub fn assembler_with(provider: Arc<dyn AdvisoryProvider>) -> ReportAssembler {
    assembler().with_advisory(provider, Duration::from_secs(5))
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

/// Answers every request with the same text and counts the calls.
#[derive(Default)]
pub struct StaticAdvisory {
    pub text: String,
    pub calls: AtomicUsize,
}

impl StaticAdvisory {
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdvisoryProvider for StaticAdvisory {
    async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledAdvisory;

#[async_trait]
impl AdvisoryProvider for StalledAdvisory {
    async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

/// A throwaway HTTP server answering every request with a fixed response.
pub struct MockServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub async fn start(status_line: &'static str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let body = body.to_string();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                seen.lock().expect("lock").push(request);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            url: format!("http://{addr}/api/generate"),
            requests,
        }
    }

    pub fn request_bodies(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .map(|r| r.split("\r\n\r\n").nth(1).unwrap_or_default().to_string())
            .collect()
    }
}

/// Reads one request: headers, then `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);
        let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&data[..end]).to_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if data.len() >= end + 4 + length {
            break;
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}
