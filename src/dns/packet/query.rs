use std::borrow::Cow;
use std::io;

use crate::dns::packet::primitives::{AnyDnsClass, AnyDnsType, AnyQueryKind, DnsClass, DnsType, QueryKind};

/// AnyQuery is single question DNS request, by default for records of every type,
/// which answers are decoded by `parse_any_reply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyQuery<'a> {
    pub id: u16,

    /// name is domain name represented as string, trailing dot is optional
    pub name: Cow<'a, str>,
    pub query_kind: AnyQueryKind,
    pub recursion_desired: bool,

    pub ty: AnyDnsType,
    pub cls: AnyDnsClass,
}

impl<'a> AnyQuery<'a> {
    /// make_any constructs request with reasonable defaults asking for all records of given domain
    pub fn make_any(domain: &'a str) -> Self {
        AnyQuery {
            id: 0,
            name: Cow::Borrowed(domain),
            query_kind: AnyQueryKind::Known(QueryKind::StandardQuery),
            recursion_desired: true,
            ty: AnyDnsType::Known(DnsType::ANY),
            cls: AnyDnsClass::Known(DnsClass::IN),
        }
    }

    /// to_dns_binary serializes given request into DNS binary format.
    ///
    /// # Error
    /// It returns error if writer fails or if some label is empty or longer than 63 bytes.
    pub fn to_dns_binary(&self, w: &mut impl io::Write) -> Result<(), io::Error> {
        /*
        Header format described in RFC:

        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |                      ID                       |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |                    QDCOUNT                    |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |                    ANCOUNT                    |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |                    NSCOUNT                    |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        |                    ARCOUNT                    |
        +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        */

        let query_kind_num: u8 = self.query_kind.into();
        let query_kind_num = query_kind_num & 0b00001111;
        let rd = if self.recursion_desired { 0b00000001 } else { 0 };

        w.write_all(&self.id.to_be_bytes()[..])?;
        w.write_all(&[(query_kind_num << 3) | rd, 0b00000000])?;
        // QDCOUNT, ANCOUNT, NSCOUNT, ARCOUNT
        for count in [1u16, 0, 0, 0].iter() {
            w.write_all(&count.to_be_bytes()[..])?;
        }

        let name: &str = &self.name;
        let name = name.strip_suffix('.').unwrap_or(name);
        if !name.is_empty() {
            for l in name.split('.') {
                if l.len() > 63 {
                    return Err(io::Error::new(io::ErrorKind::InvalidInput, "Some label in name is too long"));
                }
                if l.is_empty() {
                    return Err(io::Error::new(io::ErrorKind::InvalidInput, "Some label in name is zero sized"));
                }
                w.write_all(&[(l.len() as u8)])?;
                w.write_all(l.as_bytes())?;
            }
        }
        // last label with zero length
        w.write_all(&[0u8])?;

        let ty: u16 = self.ty.into();
        let cls: u16 = self.cls.into();
        w.write_all(&ty.to_be_bytes()[..])?;
        w.write_all(&cls.to_be_bytes()[..])?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(query: &AnyQuery) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        query.to_dns_binary(&mut buf)?;
        Ok(buf)
    }

    #[test]
    fn test_encodes_any_query() {
        let mut query = AnyQuery::make_any("example.com.");
        query.id = 0xbeef;
        let data = encode(&query).unwrap();
        assert_eq!(
            hex::encode(&data),
            "beef01000001000000000000076578616d706c6503636f6d0000ff0001"
        );
    }

    #[test]
    fn test_encodes_root() {
        let mut query = AnyQuery::make_any(".");
        query.recursion_desired = false;
        query.ty = AnyDnsType::Known(DnsType::SOA);
        let data = encode(&query).unwrap();
        assert_eq!(hex::encode(&data), "0000000000010000000000000000060001");
    }

    #[test]
    fn test_rejects_invalid_labels() {
        assert!(encode(&AnyQuery::make_any("a..b")).is_err());
        let long = format!("{}.com", "x".repeat(64));
        assert!(encode(&AnyQuery::make_any(&long)).is_err());
    }
}
