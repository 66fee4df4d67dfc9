/*
 * reply.rs
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

//! Status-line classification (+OK / -ERR) and the closed set of command
//! verbs from RFC 1939 sections 5-7.

use std::fmt;

/// Positive status indicator.
pub const OK: &str = "+OK";
/// Negative status indicator.
pub const ERR: &str = "-ERR";

/// POP3 command verbs used by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    User,
    Pass,
    Stat,
    List,
    Retr,
    Dele,
    Noop,
    Rset,
    Top,
    Uidl,
    Quit,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::User => "USER",
            Verb::Pass => "PASS",
            Verb::Stat => "STAT",
            Verb::List => "LIST",
            Verb::Retr => "RETR",
            Verb::Dele => "DELE",
            Verb::Noop => "NOOP",
            Verb::Rset => "RSET",
            Verb::Top => "TOP",
            Verb::Uidl => "UIDL",
            Verb::Quit => "QUIT",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// True iff the first whitespace-delimited token is "+OK".
/// A reply with no tokens classifies as neither positive nor negative.
pub fn is_positive(line: &str) -> bool {
    first_token(line) == Some(OK)
}

/// True iff the first whitespace-delimited token is "-ERR".
pub fn is_negative(line: &str) -> bool {
    first_token(line) == Some(ERR)
}

/// For a negative reply, the remaining tokens joined by single spaces.
pub fn error_text(line: &str) -> Option<String> {
    if !is_negative(line) {
        return None;
    }
    Some(
        line.split_whitespace()
            .skip(1)
            .collect::<Vec<&str>>()
            .join(" "),
    )
}
