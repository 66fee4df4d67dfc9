/*
 * error.rs
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

//! POP3 client errors: transport, greeting, rejection, malformed replies.

use std::fmt;
use std::io;

/// Errors from a POP3 session.
///
/// A `CommandRejected` leaves the session usable for further commands; the
/// other variants mean the session (or its construction) is unusable.
#[derive(Debug)]
pub enum Pop3Error {
    /// Underlying read/write/shutdown failure. Fatal to the session; the
    /// client never retries. End of stream in the middle of a reply surfaces
    /// as `UnexpectedEof`.
    Io(io::Error),
    /// The server's greeting line was not positive. No command had been sent
    /// yet, so this is distinct from a command rejection. Carries the
    /// verbatim greeting line.
    ServerNotReady(String),
    /// The server answered a command with -ERR. Carries the server's text
    /// after the status token.
    CommandRejected(String),
    /// The server claimed success but the reply payload is unusable: missing
    /// fields, a non-numeric field, a status line that is neither +OK nor
    /// -ERR, or a message body the structure parser cannot decode.
    MalformedReply { line: String, reason: String },
}

impl Pop3Error {
    pub(crate) fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReply {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Pop3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pop3Error::Io(e) => write!(f, "{}", e),
            Pop3Error::ServerNotReady(line) => {
                write!(f, "server not ready: {}", line)
            }
            Pop3Error::CommandRejected(text) => {
                write!(f, "command rejected: {}", text)
            }
            Pop3Error::MalformedReply { line, reason } => {
                write!(f, "malformed reply ({}): {}", reason, line)
            }
        }
    }
}

impl std::error::Error for Pop3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Pop3Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Pop3Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_display_carries_server_text() {
        let e = Pop3Error::CommandRejected("no such message".to_string());
        assert_eq!(e.to_string(), "command rejected: no such message");
    }

    #[test]
    fn io_error_converts() {
        let e: Pop3Error = io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed").into();
        assert!(matches!(e, Pop3Error::Io(_)));
    }
}
