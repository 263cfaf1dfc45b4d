use std::collections::TryReserveError;
use std::error::Error;

pub use names::{NameDecompressor, NameExpander};
pub use walker::{parse_any_reply, parse_any_reply_with};

use crate::dns::AnyReply;

mod cursor;
mod frame;
mod names;
mod rdata;
mod walker;

#[cfg(test)]
mod testing;

/// AnyParseError says why response could not be turned into `AnyReply`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum AnyParseError {
    /// Structure or bounds violation: short buffer, question count other than one,
    /// data running past its record or past the message.
    #[display(fmt = "malformed DNS message")]
    Malformed,

    /// Message was fine but yielded no records.
    #[display(fmt = "no decodable records in DNS message")]
    NoData,

    #[display(fmt = "out of memory while decoding DNS message")]
    OutOfMemory,

    /// Raised by name decompression: name runs out of message, uses reserved label type
    /// or follows too many pointers.
    #[display(fmt = "malformed domain name in DNS message")]
    BadName,
}

impl Error for AnyParseError {}

impl From<TryReserveError> for AnyParseError {
    fn from(_: TryReserveError) -> Self {
        AnyParseError::OutOfMemory
    }
}

impl AnyReply {
    #[inline]
    pub fn parse_dns_binary(data: &[u8]) -> Result<Self, AnyParseError> {
        walker::parse_any_reply(data)
    }
}
