use crate::dns::packet::parse::names::NameExpander;
use crate::dns::packet::parse::AnyParseError;

/// WireCursor walks part of DNS message.
///
/// It keeps whole message around since compressed names point anywhere in it, but reads
/// only between its position and `end`. Every read goes through `take`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireCursor<'a> {
    msg: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> WireCursor<'a> {
    pub fn new(msg: &'a [u8]) -> Self {
        Self {
            msg,
            pos: 0,
            end: msg.len(),
        }
    }

    pub fn at(msg: &'a [u8], pos: usize) -> Result<Self, AnyParseError> {
        if pos > msg.len() {
            return Err(AnyParseError::Malformed);
        }
        Ok(Self {
            msg,
            pos,
            end: msg.len(),
        })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// take consumes exactly `n` bytes or fails leaving cursor untouched.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], AnyParseError> {
        let end = self.pos
            .checked_add(n)
            .filter(|end| *end <= self.end)
            .ok_or(AnyParseError::Malformed)?;
        let res = &self.msg[self.pos..end];
        self.pos = end;
        Ok(res)
    }

    pub fn take_rest(&mut self) -> &'a [u8] {
        let res = &self.msg[self.pos..self.end];
        self.pos = self.end;
        res
    }

    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), AnyParseError> {
        self.take(n).map(|_| ())
    }

    /// split consumes `n` bytes and returns cursor limited to them.
    pub fn split(&mut self, n: usize) -> Result<WireCursor<'a>, AnyParseError> {
        let start = self.pos;
        self.skip(n)?;
        Ok(WireCursor {
            msg: self.msg,
            pos: start,
            end: self.pos,
        })
    }

    pub fn peek(&self, n: usize) -> Option<&'a [u8]> {
        self.clone().take(n).ok()
    }

    pub fn read_u8(&mut self) -> Result<u8, AnyParseError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, AnyParseError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, AnyParseError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// read_name expands name starting at current position and skips its in-place bytes.
    ///
    /// Expansion may follow pointers anywhere in the message but name's own bytes
    /// still have to fit before `end`.
    pub fn read_name<E>(&mut self, names: &E) -> Result<String, AnyParseError>
        where E: NameExpander + ?Sized {
        let (name, consumed) = names.expand(self.msg, self.pos)?;
        self.skip(consumed)?;
        Ok(name)
    }

    /// at_opt_record checks whether bytes right after current one are type of OPT record
    /// preceded by root name.
    pub fn at_opt_record(&self) -> bool {
        match self.peek(3) {
            Some(b) => b[1..3] == [0x00, 0x29],
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DATA: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0xff];

    #[test]
    fn test_reads_big_endian_numbers() {
        let mut c = WireCursor::new(DATA);
        assert_eq!(c.read_u16(), Ok(1));
        assert_eq!(c.read_u32(), Ok(0x0e10));
        assert_eq!(c.read_u8(), Ok(0xff));
        assert!(c.is_empty());
    }

    #[test]
    fn test_take_past_end_fails_without_moving() {
        let mut c = WireCursor::at(DATA, 5).unwrap();
        assert_eq!(c.take(3), Err(AnyParseError::Malformed));
        assert_eq!(c.position(), 5);
        assert_eq!(c.take(usize::MAX), Err(AnyParseError::Malformed));
        assert_eq!(c.take(2), Ok(&DATA[5..]));
        assert_eq!(c.take(0), Ok(&[][..]));
    }

    #[test]
    fn test_cursor_can_not_start_past_end() {
        assert!(WireCursor::at(DATA, DATA.len()).is_ok());
        assert_eq!(WireCursor::at(DATA, DATA.len() + 1), Err(AnyParseError::Malformed));
    }

    #[test]
    fn test_split_limits_reads() {
        let mut c = WireCursor::new(DATA);
        let mut sub = c.split(2).unwrap();
        assert_eq!(c.position(), 2);
        assert_eq!(sub.remaining(), 2);
        assert_eq!(sub.read_u32(), Err(AnyParseError::Malformed));
        assert_eq!(sub.read_u16(), Ok(1));
        assert_eq!(sub.take_rest(), &[][..]);
        assert_eq!(c.split(6), Err(AnyParseError::Malformed));
    }

    #[test]
    fn test_detects_opt_record() {
        assert!(WireCursor::new(&[0x00, 0x00, 0x29, 0x10, 0x00]).at_opt_record());
        assert!(!WireCursor::new(&[0xc0, 0x0c, 0x00, 0x01]).at_opt_record());
        assert!(!WireCursor::new(&[0x00, 0x00]).at_opt_record());
    }
}
