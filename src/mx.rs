/*
 * mx.rs
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

//! MX-aware dialing helper. Rewrites a host to its preferred mail exchanger
//! for callers that want it; the protocol engine itself never consults DNS.

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolve the preferred (lowest-preference) mail exchanger for `host`.
/// Falls back to `host` itself when no MX records exist or the lookup fails.
/// The port is passed through unchanged.
pub async fn resolve_mail_exchanger(host: &str, port: u16) -> (String, u16) {
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
    match resolver.mx_lookup(host).await {
        Ok(mx) => {
            let mut hosts: Vec<(u16, String)> = mx
                .iter()
                .map(|r| (r.preference(), r.exchange().to_string()))
                .collect();
            hosts.sort_by_key(|(preference, _)| *preference);
            match hosts.into_iter().next() {
                Some((_, exchange)) => (exchange.trim_end_matches('.').to_string(), port),
                None => (host.to_string(), port),
            }
        }
        Err(_) => (host.to_string(), port),
    }
}
