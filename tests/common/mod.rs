// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use yarn_mappings::{VersionEntry, VersionTable};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const HEADER: &str = "tiny\t2\t0\tofficial\tintermediary\tnamed\n";

/// A small, well-formed Tiny v2 file
pub fn sample_tiny() -> String {
    format!(
        "{}{}",
        HEADER,
        concat!(
            "\tsorted\n",
            "c\ta\tnet/minecraft/class_1297\tnet/minecraft/entity/Entity\n",
            "\tc\tAn entity.\n",
            "\tm\t()V\ta\tmethod_5773\ttick\n",
            "\t\tc\tTicks the entity.\n",
            "\tm\t(Lbwv;)Z\tb\tmethod_5805\tisAlive\n",
            "\t\tp\t1\t\t\tworld\n",
            "\tf\tI\tc\tfield_6012\tage\n",
            "c\tb\tnet/minecraft/class_1937\tnet/minecraft/world/World\n",
            "\tf\tZ\ta\tfield_9236\tisClient\n",
        )
    )
}

/// Expected projection of [`sample_tiny`]
pub const SAMPLE_OUTPUT: &str = "net.minecraft.class_1297 Entity\n\
method_5773 tick\n\
method_5805 isAlive\n\
field_6012 age\n\
net.minecraft.class_1937 World\n\
field_9236 isClient";

/// Build an in-memory jar holding the given files
pub fn build_jar(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in files {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Jar with a mergedv2 layout around the given mapping text
pub fn mappings_jar(tiny: &str) -> Vec<u8> {
    build_jar(&[
        ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".as_slice()),
        ("mappings/mappings.tiny", tiny.as_bytes()),
    ])
}

/// Version table pointing every id at `<base>/<id>.jar`
pub fn table_for(base: &str, ids: &[&str]) -> VersionTable {
    VersionTable::new(
        ids.iter()
            .map(|id| VersionEntry {
                id: id.to_string(),
                url: format!("{}/{}.jar", base, id),
            })
            .collect(),
    )
    .unwrap()
}

/// Minimal HTTP/1.1 responder for fetcher tests
///
/// Serves fixed bodies by request path and records every path requested.
/// Unknown paths get a 404.
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, Vec<u8>)>) -> Self {
        Self::spawn(routes, None)
    }

    /// Like [`TestServer::start`], but every response advertises
    /// `declared_length` in `Content-Length` and closes after the real body
    pub fn start_truncated(routes: Vec<(&str, Vec<u8>)>, declared_length: usize) -> Self {
        Self::spawn(routes, Some(declared_length))
    }

    fn spawn(routes: Vec<(&str, Vec<u8>)>, declared_length: Option<usize>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, Vec<u8>> = routes
            .into_iter()
            .map(|(path, body)| (path.to_string(), body))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &routes, &seen, declared_length);
            }
        });

        Self { base_url, requests }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Vec<u8>>,
    seen: &Mutex<Vec<String>>,
    declared_length: Option<usize>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers up to the blank line
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(path.clone());

    let (status, body): (&str, &[u8]) = match routes.get(&path) {
        Some(body) => ("200 OK", body.as_slice()),
        None => ("404 Not Found", &b"not found"[..]),
    };

    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/java-archive\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        declared_length.unwrap_or(body.len())
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
