use crate::dns::packet::parse::AnyParseError;

/// NameExpander turns possibly compressed domain name into text.
///
/// Implementations have to make sure that following pointers never leaves `msg`
/// and always terminates; record walker trusts them on that.
pub trait NameExpander {
    /// expand reads name starting at `offset` in `msg`.
    ///
    /// Returns expanded name and number of bytes the name takes at `offset`, which
    /// for compressed names ends after first pointer.
    fn expand(&self, msg: &[u8], offset: usize) -> Result<(String, usize), AnyParseError>;
}

impl<'a, E: NameExpander + ?Sized> NameExpander for &'a E {
    #[inline]
    fn expand(&self, msg: &[u8], offset: usize) -> Result<(String, usize), AnyParseError> {
        (**self).expand(msg, offset)
    }
}

/// NameDecompressor is RFC1035 name reader producing presentation format names.
///
/// Because of message compression names may be scattered over whole message and
/// pointers may form loops. Loops are cut by limiting amount of pointers single name may follow.
/// Names longer than 255 octets in wire form are rejected.
///
/// Labels are joined with dots, without trailing one. Root name is empty string.
/// Dots and backslashes inside labels are escaped with backslash, non-printable
/// bytes are written as `\DDD`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NameDecompressor {
    max_pointer_hops: u8,
}

impl NameDecompressor {
    pub const DEFAULT_MAX_POINTER_HOPS: u8 = 16;

    /// MAX_NAME_LEN is limit of name length in wire form, labels' length bytes and root included.
    pub const MAX_NAME_LEN: usize = 255;

    pub fn new() -> Self {
        Self::with_max_pointer_hops(Self::DEFAULT_MAX_POINTER_HOPS)
    }

    pub fn with_max_pointer_hops(max_pointer_hops: u8) -> Self {
        Self { max_pointer_hops }
    }
}

impl Default for NameDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExpander for NameDecompressor {
    fn expand(&self, msg: &[u8], offset: usize) -> Result<(String, usize), AnyParseError> {
        let mut name = String::new();
        let mut pos = offset;
        let mut hops = 0u8;
        // root label
        let mut wire_len = 1;
        // set once first pointer is followed, pos may be before offset afterwards
        let mut consumed = None;

        loop {
            let len = *msg.get(pos).ok_or(AnyParseError::BadName)? as usize;
            match len & 0xc0 {
                0xc0 => {
                    let low = *msg.get(pos + 1).ok_or(AnyParseError::BadName)? as usize;
                    let target = ((len & 0x3f) << 8) | low;
                    if target >= msg.len() || hops >= self.max_pointer_hops {
                        return Err(AnyParseError::BadName);
                    }
                    hops += 1;
                    if consumed.is_none() {
                        consumed = Some(pos + 2 - offset);
                    }
                    pos = target;
                }
                0x00 if len == 0 => {
                    let consumed = match consumed {
                        Some(consumed) => consumed,
                        None => pos + 1 - offset,
                    };
                    return Ok((name, consumed));
                }
                0x00 => {
                    wire_len += 1 + len;
                    if wire_len > Self::MAX_NAME_LEN {
                        return Err(AnyParseError::BadName);
                    }
                    let label = msg.get(pos + 1..pos + 1 + len).ok_or(AnyParseError::BadName)?;
                    if !name.is_empty() {
                        name.push('.');
                    }
                    push_escaped(&mut name, label);
                    pos += 1 + len;
                }
                // 0x40 and 0x80 label types are reserved
                _ => return Err(AnyParseError::BadName),
            }
        }
    }
}

fn push_escaped(name: &mut String, label: &[u8]) {
    for &b in label {
        match b {
            b'.' | b'\\' => {
                name.push('\\');
                name.push(b as char);
            }
            0x20..=0x7e => name.push(b as char),
            _ => name.push_str(&format!("\\{:03}", b)),
        }
    }
}
