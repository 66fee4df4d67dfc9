/*
 * session.rs
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

//! POP3 session: greeting handshake, then USER/PASS, STAT, LIST, RETR, TOP,
//! DELE, NOOP, RSET, UIDL, QUIT. Strictly one command in flight; every
//! operation takes `&mut self` and returns only after the full reply (status
//! line or dot-terminated block) has been read.

use mail_parser::Message;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::decode::decode_message;
use crate::error::Pop3Error;
use crate::net::Pop3Stream;
use crate::reply::{self, Verb};
use crate::transport::LineTransport;

/// Maildrop statistics from STAT: message count and total size in octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaildropStat {
    pub count: u32,
    pub size: u64,
}

/// Scan listing from LIST: message number and size in octets.
/// The message number is not unique across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanListing {
    pub id: u32,
    pub size: u64,
}

/// Unique-id listing from UIDL: message number and the server's opaque
/// unique-id, stable across sessions for the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidListing {
    pub id: u32,
    pub uid: String,
}

/// A POP3 session over an exclusive byte stream. Constructed only by the
/// greeting handshake; consumed by `quit`. Deletion via `dele` is deferred:
/// it takes effect only on a clean `quit` and is reversible with `rset`
/// within the same session.
pub struct Pop3Session<S> {
    transport: LineTransport<S>,
}

impl Pop3Session<Pop3Stream> {
    /// Dial the server (plain TCP or implicit TLS) and perform the greeting
    /// handshake.
    pub async fn connect(host: &str, port: u16, use_tls: bool) -> Result<Self, Pop3Error> {
        let stream = Pop3Stream::connect(host, port, use_tls).await?;
        Self::start(stream).await
    }
}

impl<S> Pop3Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Greeting handshake over an already established stream: read exactly
    /// one line before any command is sent. A non-positive greeting means no
    /// usable session exists.
    pub async fn start(stream: S) -> Result<Self, Pop3Error> {
        let mut transport = LineTransport::new(stream);
        let line = transport.read_line().await?;
        if !reply::is_positive(&line) {
            return Err(Pop3Error::ServerNotReady(line));
        }
        Ok(Self { transport })
    }

    /// One round trip: send the command line, read one status line, reject
    /// on -ERR. Returns the status line for callers that parse fields out
    /// of it.
    async fn command(&mut self, line: &str) -> Result<String, Pop3Error> {
        self.transport.send_line(line).await?;
        let status = self.transport.read_line().await?;
        if reply::is_positive(&status) {
            return Ok(status);
        }
        if reply::is_negative(&status) {
            return Err(Pop3Error::CommandRejected(
                reply::error_text(&status).unwrap_or_default(),
            ));
        }
        Err(Pop3Error::malformed(
            status,
            "status line is neither +OK nor -ERR",
        ))
    }

    /// USER, PASS, then NOOP. Some servers accept USER/PASS and only report
    /// an authentication failure on the next command; the trailing NOOP
    /// flushes that verdict out.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), Pop3Error> {
        self.command(&format!("{} {}", Verb::User, username)).await?;
        self.command(&format!("{} {}", Verb::Pass, password)).await?;
        self.noop().await
    }

    /// STAT: message count and total maildrop size.
    pub async fn stat(&mut self) -> Result<MaildropStat, Pop3Error> {
        let status = self.command(Verb::Stat.as_str()).await?;
        Ok(MaildropStat {
            count: numeric_field(&status, 1)? as u32,
            size: numeric_field(&status, 2)?,
        })
    }

    /// LIST with an explicit message number: one scan listing from the
    /// status line.
    pub async fn list(&mut self, msg: u32) -> Result<ScanListing, Pop3Error> {
        let status = self.command(&format!("{} {}", Verb::List, msg)).await?;
        Ok(ScanListing {
            id: numeric_field(&status, 1)? as u32,
            size: numeric_field(&status, 2)?,
        })
    }

    /// LIST with no argument: scan listings for the whole maildrop from the
    /// multi-line block. Any non-numeric field anywhere fails the call.
    pub async fn list_all(&mut self) -> Result<Vec<ScanListing>, Pop3Error> {
        self.command(Verb::List.as_str()).await?;
        let lines = self.transport.read_block().await?;
        let mut listings = Vec::with_capacity(lines.len());
        for line in &lines {
            listings.push(ScanListing {
                id: numeric_field(line, 0)? as u32,
                size: numeric_field(line, 1)?,
            });
        }
        Ok(listings)
    }

    /// UIDL with an explicit message number.
    pub async fn uidl(&mut self, msg: u32) -> Result<UidListing, Pop3Error> {
        let status = self.command(&format!("{} {}", Verb::Uidl, msg)).await?;
        Ok(UidListing {
            id: numeric_field(&status, 1)? as u32,
            uid: text_field(&status, 2)?,
        })
    }

    /// UIDL with no argument: unique-id listings for the whole maildrop.
    pub async fn uidl_all(&mut self) -> Result<Vec<UidListing>, Pop3Error> {
        self.command(Verb::Uidl.as_str()).await?;
        let lines = self.transport.read_block().await?;
        let mut listings = Vec::with_capacity(lines.len());
        for line in &lines {
            listings.push(UidListing {
                id: numeric_field(line, 0)? as u32,
                uid: text_field(line, 1)?,
            });
        }
        Ok(listings)
    }

    /// RETR: the full message as raw bytes (CRLF line endings, unstuffed,
    /// terminator excluded).
    pub async fn retr_raw(&mut self, msg: u32) -> Result<Vec<u8>, Pop3Error> {
        self.command(&format!("{} {}", Verb::Retr, msg)).await?;
        self.transport.read_body().await
    }

    /// RETR plus RFC 5322 parsing of the retrieved bytes.
    pub async fn retr(&mut self, msg: u32) -> Result<Message<'static>, Pop3Error> {
        let raw = self.retr_raw(msg).await?;
        Ok(decode_message(&raw)?.into_owned())
    }

    /// TOP: the headers plus the first `lines` lines of the body, raw.
    pub async fn top_raw(&mut self, msg: u32, lines: u32) -> Result<Vec<u8>, Pop3Error> {
        self.command(&format!("{} {} {}", Verb::Top, msg, lines))
            .await?;
        self.transport.read_body().await
    }

    /// TOP plus RFC 5322 parsing.
    pub async fn top(&mut self, msg: u32, lines: u32) -> Result<Message<'static>, Pop3Error> {
        let raw = self.top_raw(msg, lines).await?;
        Ok(decode_message(&raw)?.into_owned())
    }

    /// DELE: mark a message for deletion. Effective only on a clean `quit`;
    /// reversible with `rset` until then.
    pub async fn dele(&mut self, msg: u32) -> Result<(), Pop3Error> {
        self.command(&format!("{} {}", Verb::Dele, msg)).await?;
        Ok(())
    }

    /// NOOP: provoke deferred errors or keep the session alive.
    pub async fn noop(&mut self) -> Result<(), Pop3Error> {
        self.command(Verb::Noop.as_str()).await?;
        Ok(())
    }

    /// RSET: clear all deletion marks set in this session.
    pub async fn rset(&mut self) -> Result<(), Pop3Error> {
        self.command(Verb::Rset.as_str()).await?;
        Ok(())
    }

    /// QUIT: sent without awaiting a reply, then the stream is shut down.
    /// Consumes the session; a shutdown error is still surfaced.
    pub async fn quit(mut self) -> Result<(), Pop3Error> {
        self.transport.send_line(Verb::Quit.as_str()).await?;
        self.transport.shutdown().await
    }
}

/// Whitespace-delimited field parsed as an integer. Missing or non-numeric
/// fields are malformed replies: the server claimed success but the payload
/// is unusable.
fn numeric_field(line: &str, idx: usize) -> Result<u64, Pop3Error> {
    let field = text_field(line, idx)?;
    field
        .parse()
        .map_err(|_| Pop3Error::malformed(line, format!("field {} is not numeric", idx)))
}

fn text_field(line: &str, idx: usize) -> Result<String, Pop3Error> {
    line.split_whitespace()
        .nth(idx)
        .map(str::to_string)
        .ok_or_else(|| Pop3Error::malformed(line, format!("missing field {}", idx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_parses() {
        assert_eq!(numeric_field("+OK 2 320", 1).unwrap(), 2);
        assert_eq!(numeric_field("+OK 2 320", 2).unwrap(), 320);
    }

    #[test]
    fn numeric_field_rejects_garbage() {
        assert!(matches!(
            numeric_field("+OK two 320", 1),
            Err(Pop3Error::MalformedReply { .. })
        ));
        assert!(matches!(
            numeric_field("+OK", 1),
            Err(Pop3Error::MalformedReply { .. })
        ));
    }
}
