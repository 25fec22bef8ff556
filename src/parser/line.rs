use std::io::{BufRead, Read, Result as IoResult};

/// One physical line of the route table, never longer than the capacity it
/// was read with minus one byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    data: Vec<u8>,
}

impl RawLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn first(&self) -> Option<u8> {
        self.data.first().copied()
    }
}

/// Reads up to `capacity - 1` bytes, stopping after the first newline.
/// Whatever is left of an overlong line stays in the stream. Returns
/// `Ok(None)` once the stream is exhausted.
pub fn fetch_line<R: BufRead>(stream: &mut R, capacity: usize) -> IoResult<Option<RawLine>> {
    let limit = capacity.saturating_sub(1) as u64;
    let mut data = Vec::with_capacity(capacity);

    let read = stream.by_ref().take(limit).read_until(b'\n', &mut data)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(RawLine { data }))
}

fn is_address_char(c: u8) -> bool {
    c.is_ascii_hexdigit() || c == b':'
}

/// The address token starting at `offset`: everything up to the first byte
/// that is neither a hex digit nor ':'. Empty if the line is shorter than
/// `offset`.
pub fn truncate_at_address_boundary(line: &RawLine, offset: usize) -> &str {
    let tail = line.as_bytes().get(offset..).unwrap_or_default();
    let end = tail
        .iter()
        .position(|&c| !is_address_char(c))
        .unwrap_or(tail.len());

    // hex digits and ':' are always ASCII
    std::str::from_utf8(&tail[..end]).unwrap_or_default()
}
