/*
 * lib.rs
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

//! POP3 (RFC 1939) client: connect plain or over TLS, USER/PASS, STAT,
//! LIST, RETR, TOP, DELE, NOOP, RSET, UIDL, QUIT.
//!
//! The protocol is strictly request/response with one command in flight;
//! a `Pop3Session` exclusively owns its byte stream and every operation
//! blocks until the full reply, status line or dot-terminated block, has
//! been read.
//!
//! ```no_run
//! use cassetta::Pop3Session;
//!
//! # async fn example() -> Result<(), cassetta::Pop3Error> {
//! let mut session = Pop3Session::connect("pop.example.org", 995, true).await?;
//! session.login("mrose", "tanstaaf").await?;
//! let stat = session.stat().await?;
//! for listing in session.list_all().await? {
//!     let message = session.retr(listing.id).await?;
//!     let _ = message.subject();
//! }
//! session.quit().await?;
//! # let _ = stat;
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod error;
pub mod mx;
pub mod net;
pub mod reply;
pub mod session;
pub mod transport;

pub use error::Pop3Error;
pub use net::Pop3Stream;
pub use session::{MaildropStat, Pop3Session, ScanListing, UidListing};
