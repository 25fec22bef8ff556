use crate::parser::line::{fetch_line, truncate_at_address_boundary};
use crate::{Layout, ParseError};
use log::{debug, trace, warn};
use std::{fmt, io::BufRead, net::Ipv6Addr};

/// One entry of the IPv6 routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteRecord {
    pub prefix: Ipv6Addr,
    pub netmask: Ipv6Addr,
    pub router: Ipv6Addr,
}

impl RouteRecord {
    /// Length of the netmask in bits, `None` if the mask is not contiguous.
    pub fn prefix_len(&self) -> Option<u8> {
        let mask = u128::from(self.netmask);
        let ones = mask.leading_ones();

        if mask.checked_shl(ones).unwrap_or(0) != 0 {
            return None;
        }

        Some(ones as u8)
    }
}

impl fmt::Display for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix_len() {
            Some(len) => write!(f, "{}/{} via {}", self.prefix, len, self.router),
            None => write!(
                f,
                "{} netmask {} via {}",
                self.prefix, self.netmask, self.router
            ),
        }
    }
}

/// The three lines of an entry, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prefix,
    Netmask,
    Router,
}

impl Field {
    /// Label used for the field in the route file.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Prefix => "target",
            Field::Netmask => "netmask",
            Field::Router => "router",
        }
    }

    fn starts_line(&self, first: u8) -> bool {
        match self {
            Field::Prefix => first.is_ascii_digit(),
            Field::Netmask | Field::Router => first == b' ',
        }
    }

    fn marker_error(&self) -> ParseError {
        match self {
            Field::Prefix => ParseError::InvalidIndexLine,
            field => ParseError::MissingContinuation { field: *field },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to report when the stream ends after an entry has started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Treat it as the end of the table, the same as a clean end.
    #[default]
    Lenient,
    /// Fail with [`ParseError::TruncatedRecord`].
    Strict,
}

/// Reads the next entry using the procfs layout. `Ok(None)` means the table
/// has been fully read.
pub fn read_next_route<R: BufRead>(stream: &mut R) -> Result<Option<RouteRecord>, ParseError> {
    read_next_route_with(stream, &Layout::default(), TruncationPolicy::default())
}

pub fn read_next_route_with<R: BufRead>(
    stream: &mut R,
    layout: &Layout,
    policy: TruncationPolicy,
) -> Result<Option<RouteRecord>, ParseError> {
    layout.validate().map_err(ParseError::InvalidLayout)?;

    let prefix = match read_field(stream, layout, Field::Prefix)? {
        Some(addr) => addr,
        None => return Ok(None),
    };

    let netmask = match read_field(stream, layout, Field::Netmask)? {
        Some(addr) => addr,
        None => return truncated(Field::Netmask, policy),
    };

    let router = match read_field(stream, layout, Field::Router)? {
        Some(addr) => addr,
        None => return truncated(Field::Router, policy),
    };

    let route = RouteRecord {
        prefix,
        netmask,
        router,
    };
    debug!("read route {}", route);

    Ok(Some(route))
}

fn read_field<R: BufRead>(
    stream: &mut R,
    layout: &Layout,
    field: Field,
) -> Result<Option<Ipv6Addr>, ParseError> {
    let line = match fetch_line(stream, layout.line_len)? {
        Some(line) => line,
        None => return Ok(None),
    };
    trace!(
        "{} line: {:?}",
        field,
        String::from_utf8_lossy(line.as_bytes())
    );

    match line.first() {
        Some(c) if field.starts_line(c) => {}
        _ => return Err(field.marker_error()),
    }

    let token = truncate_at_address_boundary(&line, layout.addr_offset);

    token
        .parse::<Ipv6Addr>()
        .map(Some)
        .map_err(|_| ParseError::InvalidAddressSyntax {
            field,
            token: token.to_string(),
        })
}

fn truncated(field: Field, policy: TruncationPolicy) -> Result<Option<RouteRecord>, ParseError> {
    match policy {
        TruncationPolicy::Lenient => {
            warn!("route table ended before the {} line, dropping entry", field);
            Ok(None)
        }
        TruncationPolicy::Strict => Err(ParseError::TruncatedRecord { field }),
    }
}
