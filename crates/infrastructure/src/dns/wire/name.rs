//! Domain name encoding and compressed-name decoding (RFC 1035 §3.1, §4.1.4)

use bytes::{BufMut, BytesMut};
use ferrous_lookup_domain::LookupError;
use smallvec::SmallVec;

pub const MAX_NAME_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_POINTER_HOPS: usize = 16;

/// Length limit of a name in wire form, including length octets and the root label.
const MAX_WIRE_NAME_LEN: usize = 255;
const POINTER_MASK: u8 = 0xC0;

/// Trims surrounding whitespace and a single trailing dot.
pub fn normalize(domain: &str) -> &str {
    let domain = domain.trim();
    domain.strip_suffix('.').unwrap_or(domain)
}

/// Writes `domain` as a sequence of length-prefixed labels ending with the root label.
pub fn encode_name(domain: &str, buf: &mut BytesMut) -> Result<(), LookupError> {
    let domain = normalize(domain);

    if domain.is_empty() {
        return Err(LookupError::Encoding("domain must not be empty".to_string()));
    }
    if domain.len() > MAX_NAME_LEN {
        return Err(LookupError::Encoding(format!(
            "'{}' is {} octets long (max {})",
            domain,
            domain.len(),
            MAX_NAME_LEN
        )));
    }

    let labels: SmallVec<[&str; 8]> = domain.split('.').collect();

    for label in &labels {
        if label.is_empty() {
            return Err(LookupError::Encoding(format!(
                "'{}' contains an empty label",
                domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(LookupError::Encoding(format!(
                "label '{}' is {} octets long (max {})",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LookupError::Encoding(format!(
                "'{}' contains invalid character {:?}",
                domain, c
            )));
        }
    }

    for label in &labels {
        buf.put_u8(label.len() as u8);
        buf.put_slice(label.as_bytes());
    }
    buf.put_u8(0);

    Ok(())
}

/// Reads a possibly compressed name starting at `offset`.
///
/// Returns the dotted name (no trailing dot) and the offset just past the name
/// in the message, i.e. after the first pointer if one was followed.
pub fn read_name(message: &[u8], offset: usize) -> Result<(String, usize), LookupError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut end: Option<usize> = None;
    let mut hops = 0usize;
    let mut wire_len = 0usize;

    loop {
        let len = *message
            .get(pos)
            .ok_or_else(|| malformed(format!("name at offset {} runs past end of message", offset)))?;

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = *message.get(pos + 1).ok_or_else(|| {
                    malformed(format!("compression pointer at offset {} is cut short", pos))
                })?;

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(malformed(format!(
                        "compression pointer chain exceeds {} hops",
                        MAX_POINTER_HOPS
                    )));
                }

                if end.is_none() {
                    end = Some(pos + 2);
                }
                pos = (((len & !POINTER_MASK) as usize) << 8) | low as usize;
            }
            0x00 => {
                if len == 0 {
                    return Ok((name, end.unwrap_or(pos + 1)));
                }

                let start = pos + 1;
                let stop = start + len as usize;
                let label = message.get(start..stop).ok_or_else(|| {
                    malformed(format!("label at offset {} runs past end of message", pos))
                })?;

                wire_len += len as usize + 1;
                if wire_len + 1 > MAX_WIRE_NAME_LEN {
                    return Err(malformed(format!(
                        "name at offset {} exceeds {} octets",
                        offset, MAX_WIRE_NAME_LEN
                    )));
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos = stop;
            }
            _ => {
                return Err(malformed(format!(
                    "unsupported label type 0x{:02x} at offset {}",
                    len, pos
                )));
            }
        }
    }
}

/// Case-insensitive comparison ignoring a trailing dot on either side.
pub fn names_equal(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(normalize(b))
}

fn malformed(msg: String) -> LookupError {
    LookupError::MalformedResponse(msg)
}
