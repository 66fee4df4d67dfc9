/*
 * decode.rs
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

//! Message decoder boundary: the transport drains the dot-terminated block
//! first, then the complete byte block is handed to mail-parser here. The
//! parser never reads from the stream, so however much of the input it
//! consumes, the session stays aligned on a command boundary.

use mail_parser::{Message, MessageParser};

use crate::error::Pop3Error;

/// Parse a fully retrieved RFC 5322 message block.
pub fn decode_message(raw: &[u8]) -> Result<Message<'_>, Pop3Error> {
    MessageParser::default()
        .parse(raw)
        .ok_or_else(|| Pop3Error::malformed("", "message body did not parse"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_headers_and_body() {
        let raw = b"From: mrose@dbc.mtview.ca.us\r\nSubject: greetings\r\n\r\nhello\r\n";
        let m = decode_message(raw).unwrap();
        assert_eq!(m.subject(), Some("greetings"));
        assert!(m.body_text(0).unwrap().contains("hello"));
    }
}
