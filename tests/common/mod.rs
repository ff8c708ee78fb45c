#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// Five mutants from a PIT run: 2 killed, 2 survived, 1 without coverage.
pub const PIT_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mutations>
<mutation detected='true' status='KILLED' numberOfTestsRun='3'><sourceFile>MoveService.java</sourceFile><mutatedClass>ch.teemoo.bobby.services.MoveService</mutatedClass><mutatedMethod>canMove</mutatedMethod><methodDescription>(Lch/teemoo/bobby/models/Board;)Z</methodDescription><lineNumber>377</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.returns.BooleanTrueReturnValsMutator</mutator><indexes><index>24</index></indexes><blocks><block>5</block></blocks><killingTest>ch.teemoo.bobby.services.MoveServiceTest.testGetGameStateDrawStalemate</killingTest><description>replaced boolean return with true for ch/teemoo/bobby/services/MoveService::canMove</description></mutation>
<mutation detected='false' status='NO_COVERAGE' numberOfTestsRun='0'><sourceFile>MoveService.java</sourceFile><mutatedClass>ch.teemoo.bobby.services.MoveService</mutatedClass><mutatedMethod>computeMoveAnalysis</mutatedMethod><methodDescription>(Lch/teemoo/bobby/models/Board;)Lch/teemoo/bobby/models/MoveAnalysis;</methodDescription><lineNumber>197</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.returns.NullReturnValsMutator</mutator><indexes><index>19</index></indexes><blocks><block>5</block></blocks><killingTest/><description>replaced return value with null for ch/teemoo/bobby/services/MoveService::computeMoveAnalysis</description></mutation>
<mutation detected='false' status='SURVIVED' numberOfTestsRun='19'><sourceFile>MoveService.java</sourceFile><mutatedClass>ch.teemoo.bobby.services.MoveService</mutatedClass><mutatedMethod>computePawnMoves</mutatedMethod><methodDescription>(Lch/teemoo/bobby/models/pieces/Piece;)Ljava/util/List;</methodDescription><lineNumber>437</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.MathMutator</mutator><indexes><index>79</index></indexes><blocks><block>12</block></blocks><killingTest/><description>Replaced integer multiplication with division</description></mutation>
<mutation detected='true' status='KILLED' numberOfTestsRun='1'><sourceFile>MoveService.java</sourceFile><mutatedClass>ch.teemoo.bobby.services.MoveService</mutatedClass><mutatedMethod>computePawnMoves</mutatedMethod><methodDescription>(Lch/teemoo/bobby/models/pieces/Piece;)Ljava/util/List;</methodDescription><lineNumber>451</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.MathMutator</mutator><indexes><index>162</index></indexes><blocks><block>30</block></blocks><killingTest>ch.teemoo.bobby.services.MoveServiceTest.testComputePawnMovesEnPassant</killingTest><description>Replaced integer subtraction with addition</description></mutation>
<mutation detected='false' status='SURVIVED' numberOfTestsRun='11'><sourceFile>MoveService.java</sourceFile><mutatedClass>ch.teemoo.bobby.services.MoveService</mutatedClass><mutatedMethod>computePawnMoves</mutatedMethod><methodDescription>(Lch/teemoo/bobby/models/pieces/Piece;)Ljava/util/List;</methodDescription><lineNumber>452</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.MathMutator</mutator><indexes><index>179</index></indexes><blocks><block>35</block></blocks><killingTest/><description>Replaced integer multiplication with division</description></mutation>
</mutations>
"#;

pub fn write_report(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("mutations.xml");
    std::fs::write(&path, content).unwrap();
    path
}

/// A one-shot HTTP server answering a single request with a canned response.
pub struct FakeServer {
    pub url: String,
    addr: SocketAddr,
    handle: JoinHandle<String>,
}

impl FakeServer {
    pub fn start(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{}", addr);
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            request
        });
        Self { url, addr, handle }
    }

    /// Raw text of the request the server received. Empty if the client
    /// never connected.
    pub fn request(self) -> String {
        // unblocks accept() when nobody called; queued and ignored otherwise
        let _ = TcpStream::connect(self.addr);
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(_) => break,
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = buf.len() - (end + 4);
            match content_length(&head) {
                Some(len) if body_len >= len => break,
                Some(_) => {}
                None if head.contains("transfer-encoding: chunked") => {
                    if buf.ends_with(b"0\r\n\r\n") {
                        break;
                    }
                }
                None => break,
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())
}

/// JSON body of a raw HTTP request captured by [`FakeServer`].
pub fn request_body(request: &str) -> serde_json::Value {
    let (_, body) = request
        .split_once("\r\n\r\n")
        .unwrap_or_else(|| panic!("no body in request: {request}"));
    serde_json::from_str(body).unwrap_or_else(|e| panic!("body is not JSON: {e}\n{body}"))
}
