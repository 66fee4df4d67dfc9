/*
 * transport.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Cassetta, a POP3 mailbox retrieval client.
 *
 * Cassetta is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Cassetta is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Cassetta.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Line transport: buffered CRLF-delimited reads and flushed writes over the
//! session's byte stream. Multi-line replies are drained to and including the
//! lone "." terminator before control returns, so the stream is always
//! aligned on a command boundary.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Pop3Error;

const LINE_TERMINATOR: &[u8] = b"\r\n";
/// A line consisting solely of this marks the end of a multi-line reply.
const BLOCK_TERMINATOR: &str = ".";

const READ_CHUNK: usize = 4096;

/// Buffered line reader/writer owning the session's stream. The session never
/// touches the stream directly; only line and block operations are exposed.
pub struct LineTransport<S> {
    stream: S,
    /// Bytes read from the stream but not yet consumed.
    buf: Vec<u8>,
    pos: usize,
}

impl<S> LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buf: Vec::with_capacity(READ_CHUNK),
            pos: 0,
        }
    }

    /// Read one line, stripping the CRLF. End of stream before a full line
    /// arrives is an UnexpectedEof error, never an empty line: a legitimate
    /// blank line and a closed connection are distinct outcomes.
    pub async fn read_line(&mut self) -> Result<String, Pop3Error> {
        loop {
            if let Some(i) = find_crlf(&self.buf[self.pos..]) {
                let start = self.pos;
                let line = String::from_utf8_lossy(&self.buf[start..start + i]).into_owned();
                self.pos = start + i + LINE_TERMINATOR.len();
                self.compact();
                return Ok(line);
            }
            self.fill().await?;
        }
    }

    /// Read lines until the lone "." terminator; the terminator is consumed
    /// but excluded. Stuffed payload lines ("..") are unstuffed to ".".
    pub async fn read_block(&mut self) -> Result<Vec<String>, Pop3Error> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if line == BLOCK_TERMINATOR {
                break;
            }
            lines.push(unstuff(line));
        }
        Ok(lines)
    }

    /// Dot-terminated message block as raw bytes with CRLF line endings.
    /// The block is drained through the terminator here, before any message
    /// parser sees a byte, so parser consumption can never desynchronize the
    /// stream.
    pub async fn read_body(&mut self) -> Result<Vec<u8>, Pop3Error> {
        let lines = self.read_block().await?;
        let mut out = Vec::new();
        for line in &lines {
            out.extend_from_slice(line.as_bytes());
            out.extend_from_slice(LINE_TERMINATOR);
        }
        Ok(out)
    }

    /// Write one command line plus CRLF and flush immediately. Nothing is
    /// buffered across calls.
    pub async fn send_line(&mut self, line: &str) -> Result<(), Pop3Error> {
        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(LINE_TERMINATOR).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Shut down the write half of the stream. Errors are surfaced.
    pub async fn shutdown(&mut self) -> Result<(), Pop3Error> {
        self.stream.shutdown().await?;
        Ok(())
    }

    async fn fill(&mut self) -> Result<(), Pop3Error> {
        self.compact();
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(Pop3Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed",
            )));
        }
        self.buf.extend_from_slice(&chunk[..n]);
        Ok(())
    }

    fn compact(&mut self) {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == LINE_TERMINATOR)
}

/// POP3 byte stuffing: a payload line beginning with "." is sent with an
/// extra leading "."; strip it. The inverse of SMTP dot stuffing.
fn unstuff(line: String) -> String {
    if line.starts_with("..") {
        line[1..].to_string()
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn transport_over(input: &[u8]) -> LineTransport<tokio::io::DuplexStream> {
        let (client, mut server) = tokio::io::duplex(4096);
        server.write_all(input).await.unwrap();
        drop(server);
        LineTransport::new(client)
    }

    #[tokio::test]
    async fn read_line_strips_terminator() {
        let mut t = transport_over(b"+OK 2 320\r\n").await;
        assert_eq!(t.read_line().await.unwrap(), "+OK 2 320");
    }

    #[tokio::test]
    async fn read_line_handles_split_lines() {
        let mut t = transport_over(b"first\r\nsecond\r\n").await;
        assert_eq!(t.read_line().await.unwrap(), "first");
        assert_eq!(t.read_line().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn eof_is_an_error_not_an_empty_line() {
        let mut t = transport_over(b"").await;
        match t.read_line().await {
            Err(Pop3Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected eof error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn partial_line_at_eof_is_an_error() {
        let mut t = transport_over(b"+OK no terminator").await;
        assert!(matches!(t.read_line().await, Err(Pop3Error::Io(_))));
    }

    #[tokio::test]
    async fn block_stops_at_terminator() {
        let mut t = transport_over(b"1 120\r\n2 200\r\n.\r\nNOISE\r\n").await;
        let lines = t.read_block().await.unwrap();
        assert_eq!(lines, vec!["1 120".to_string(), "2 200".to_string()]);
        // Terminator consumed, following data untouched.
        assert_eq!(t.read_line().await.unwrap(), "NOISE");
    }

    #[tokio::test]
    async fn empty_block_yields_no_lines() {
        let mut t = transport_over(b".\r\n").await;
        assert!(t.read_block().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stuffed_dot_line_is_content_not_terminator() {
        let mut t = transport_over(b"before\r\n..\r\nafter\r\n.\r\n").await;
        let lines = t.read_block().await.unwrap();
        assert_eq!(
            lines,
            vec!["before".to_string(), ".".to_string(), "after".to_string()]
        );
    }

    #[tokio::test]
    async fn body_preserves_crlf_endings() {
        let mut t = transport_over(b"Subject: hi\r\n\r\nbody\r\n.\r\n").await;
        let body = t.read_body().await.unwrap();
        assert_eq!(body, b"Subject: hi\r\n\r\nbody\r\n");
    }

    #[tokio::test]
    async fn send_line_appends_crlf_and_flushes() {
        let (client, mut server) = tokio::io::duplex(4096);
        let mut t = LineTransport::new(client);
        t.send_line("STAT").await.unwrap();
        let mut buf = [0u8; 6];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"STAT\r\n");
    }
}
