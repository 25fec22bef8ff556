use crate::{read_next_route_with, Layout, ParseError, RouteRecord, TruncationPolicy};
use log::{debug, info};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Where the kernel exposes the IPv6 routing table.
pub const DEFAULT_ROUTE_PATH: &str = "/proc/net/route/ipv6";

/// Walks a routing table one entry at a time. Stops after the first error,
/// since the stream is then somewhere inside an entry.
pub struct RouteReader<R> {
    stream: R,
    layout: Layout,
    policy: TruncationPolicy,
    done: bool,
}

impl RouteReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let f = File::open(path)?;
        info!("reading routes from {}", path.display());

        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> RouteReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            layout: Layout::default(),
            policy: TruncationPolicy::default(),
            done: false,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn collect_routes(self) -> Result<Vec<RouteRecord>, ParseError> {
        self.collect()
    }

    pub fn into_inner(self) -> R {
        self.stream
    }
}

impl<R: BufRead> Iterator for RouteReader<R> {
    type Item = Result<RouteRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match read_next_route_with(&mut self.stream, &self.layout, self.policy) {
            Ok(Some(route)) => Some(Ok(route)),
            Ok(None) => {
                debug!("end of route table");
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use std::io::Cursor;

    const TABLE: &str = "\
1   . target:  2001:db8::
      netmask: ffff:ffff:ffff:ffff::
      router:  fe80::1
2   . target:  fd00::
      netmask: ff00::
      router:  fe80::2
";

    #[test]
    fn test_collects_every_entry() {
        let routes = RouteReader::new(Cursor::new(TABLE)).collect_routes().unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].to_string(), "2001:db8::/64 via fe80::1");
        assert_eq!(routes[1].to_string(), "fd00::/8 via fe80::2");
    }

    #[test]
    fn test_empty_table() {
        let mut reader = RouteReader::new(Cursor::new(""));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_stops_after_error() {
        let text = format!("{}x   . target:  ::\n{}", TABLE, TABLE);
        let mut reader = RouteReader::new(Cursor::new(text));

        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next(),
            Some(Err(ParseError::InvalidIndexLine))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_collect_reports_first_error() {
        let text = TABLE.replace("fd00::", "fd00:::");
        let err = RouteReader::new(Cursor::new(text))
            .collect_routes()
            .unwrap_err();

        assert!(matches!(
            err,
            ParseError::InvalidAddressSyntax {
                field: Field::Prefix,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_reader_reports_truncated_table() {
        let text = format!("{}3   . target:  ::\n", TABLE);

        let lenient = RouteReader::new(Cursor::new(text.clone()))
            .collect_routes()
            .unwrap();
        assert_eq!(lenient.len(), 2);

        let err = RouteReader::new(Cursor::new(text))
            .with_policy(TruncationPolicy::Strict)
            .collect_routes()
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::TruncatedRecord {
                field: Field::Netmask
            }
        ));
    }

    #[test]
    fn test_custom_layout() {
        let layout = Layout {
            line_len: 64,
            addr_offset: 17,
        };
        let route = RouteRecord {
            prefix: "2001:db8:1::".parse().unwrap(),
            netmask: "ffff:ffff:ffff::".parse().unwrap(),
            router: "::".parse().unwrap(),
        };
        let text = layout.render(12, &route);

        let routes = RouteReader::new(Cursor::new(text))
            .with_layout(layout)
            .collect_routes()
            .unwrap();
        assert_eq!(routes, vec![route]);
    }

    #[test]
    fn test_unusable_layout_is_an_error() {
        let mut reader = RouteReader::new(Cursor::new(TABLE)).with_layout(Layout {
            line_len: 1,
            addr_offset: 0,
        });

        assert!(matches!(
            reader.next(),
            Some(Err(ParseError::InvalidLayout(_)))
        ));
        assert!(reader.next().is_none());
        assert_eq!(reader.into_inner().position(), 0);
    }

    #[test]
    fn test_into_inner_leaves_unread_entries() {
        let mut reader = RouteReader::new(Cursor::new(TABLE));
        assert!(reader.next().unwrap().is_ok());

        let mut rest = reader.into_inner();
        let route = crate::read_next_route(&mut rest).unwrap().unwrap();
        assert_eq!(route.to_string(), "fd00::/8 via fe80::2");
    }

    #[test]
    fn test_open_missing_file_is_read_failure() {
        let err = RouteReader::open("/nonexistent/route/ipv6").err().unwrap();
        assert!(matches!(err, ParseError::ReadFailure(_)));
    }
}
