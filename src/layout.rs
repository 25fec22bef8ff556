use crate::RouteRecord;
use serde::{Deserialize, Serialize};

/// Size of the line buffer, terminator included. Large enough for the
/// longest line the procfs route file generates.
pub const PROCFS_LINELEN: usize = 58;

/// Column where the address starts on every line of an entry:
///
/// ```text
///            11111111112222222222333333333344444444445555
///   12345678901234567890123456789012345678901234567890123
///   nnnn. target:  xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx
///         netmask: xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx
///         router:  xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx
/// ```
pub const ADDR_OFFSET: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub line_len: usize,
    pub addr_offset: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            line_len: PROCFS_LINELEN,
            addr_offset: ADDR_OFFSET,
        }
    }
}

impl Layout {
    /// A layout is usable when the address column falls inside the bytes a
    /// single line read can return.
    pub fn validate(&self) -> Result<(), String> {
        if self.line_len < 2 {
            return Err(format!("line_len {} is too small", self.line_len));
        }

        if self.addr_offset >= self.line_len - 1 {
            return Err(format!(
                "addr_offset {} does not fit in lines of {} bytes",
                self.addr_offset, self.line_len
            ));
        }

        Ok(())
    }

    /// Renders one entry the way the procfs route file lays it out.
    pub fn render(&self, index: usize, route: &RouteRecord) -> String {
        let indent = self.addr_offset.saturating_sub("netmask: ".len());
        let width = self.addr_offset;
        let lead = format!("{:<w$}. ", index, w = indent.saturating_sub(2));

        format!(
            "{:<width$}{}\n{:<width$}{}\n{:<width$}{}\n",
            format!("{}target:", lead),
            route.prefix,
            format!("{:indent$}netmask:", ""),
            route.netmask,
            format!("{:indent$}router:", ""),
            route.router,
        )
    }
}
