//! dns module decodes responses to DNS ANY queries into flat lists of displayable records

pub use config::*;
pub use packet::parse::{parse_any_reply, parse_any_reply_with, AnyParseError, NameDecompressor, NameExpander};
pub use packet::primitives::*;
pub use packet::query::AnyQuery;
pub use packet::reply::*;

mod config;
pub(crate) mod packet;
