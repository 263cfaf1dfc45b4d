//! Packet module implements DNS wire format handling required to decode responses
//! to ANY queries, whichever transport they came over.
//!
//! For implementation details take look at https://tools.ietf.org/html/rfc1035
pub mod primitives;
pub mod query;
pub mod reply;
pub mod parse;
