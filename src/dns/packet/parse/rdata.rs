use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::debug;

use crate::dns::packet::parse::cursor::WireCursor;
use crate::dns::packet::parse::names::NameExpander;
use crate::dns::packet::parse::AnyParseError;
use crate::dns::packet::primitives::{DnsType, RecordData, RecordKind, SoaData, SrvData};
use crate::dns::ShortSrvPolicy;

/// decode_rdata converts data of single record into its structured form.
///
/// `rdata` is limited to record's data but still sees whole message, so compressed
/// names are resolved. `Ok(None)` means record is left out on purpose.
pub(crate) fn decode_rdata<E>(
    kind: RecordKind,
    rdata: WireCursor<'_>,
    names: &E,
    short_srv: ShortSrvPolicy,
) -> Result<Option<RecordData>, AnyParseError>
    where E: NameExpander + ?Sized {
    let data = match kind {
        RecordKind::Known(ty) => match ty {
            DnsType::A => decode_a(rdata)?,
            DnsType::AAAA => decode_aaaa(rdata)?,
            DnsType::CNAME => RecordData::CNAME(decode_name(rdata, names)?),
            DnsType::NS => RecordData::NS(decode_name(rdata, names)?),
            DnsType::PTR => RecordData::PTR(decode_name(rdata, names)?),
            DnsType::MX => decode_mx(rdata, names)?,
            DnsType::SRV => return decode_srv(rdata, names, short_srv),
            DnsType::SOA => decode_soa(rdata, names)?,
            DnsType::TXT => decode_txt(rdata)?,
            DnsType::OPT | DnsType::ANY => decode_unknown(rdata)?,
        },
        RecordKind::Unknown { .. } => decode_unknown(rdata)?,
    };
    Ok(Some(data))
}

fn decode_a(mut rdata: WireCursor<'_>) -> Result<RecordData, AnyParseError> {
    if rdata.remaining() != 4 {
        return Err(AnyParseError::Malformed);
    }
    let b = rdata.take(4)?;
    Ok(RecordData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3])))
}

fn decode_aaaa(mut rdata: WireCursor<'_>) -> Result<RecordData, AnyParseError> {
    // u16 * ipv6 number count
    if rdata.remaining() != 2 * 8 {
        return Err(AnyParseError::Malformed);
    }
    let mut octets = [0u8; 16];
    octets.copy_from_slice(rdata.take(16)?);
    Ok(RecordData::AAAA(Ipv6Addr::from(octets)))
}

fn decode_name<E>(mut rdata: WireCursor<'_>, names: &E) -> Result<String, AnyParseError>
    where E: NameExpander + ?Sized {
    rdata.read_name(names)
}

fn decode_mx<E>(mut rdata: WireCursor<'_>, names: &E) -> Result<RecordData, AnyParseError>
    where E: NameExpander + ?Sized {
    if rdata.remaining() < 2 {
        return Err(AnyParseError::Malformed);
    }
    let priority = rdata.read_u16()?;
    let exchange = rdata.read_name(names)?;
    Ok(RecordData::MX { priority, exchange })
}

fn decode_srv<E>(
    mut rdata: WireCursor<'_>,
    names: &E,
    short_srv: ShortSrvPolicy,
) -> Result<Option<RecordData>, AnyParseError>
    where E: NameExpander + ?Sized {
    if rdata.remaining() < 6 {
        return match short_srv {
            ShortSrvPolicy::Reject => Err(AnyParseError::Malformed),
            ShortSrvPolicy::Skip => {
                debug!(len = rdata.remaining(), "skipping SRV record too short to decode");
                Ok(None)
            }
        };
    }
    let priority = rdata.read_u16()?;
    let weight = rdata.read_u16()?;
    let port = rdata.read_u16()?;
    let target = rdata.read_name(names)?;
    Ok(Some(RecordData::SRV(SrvData {
        priority,
        weight,
        port,
        target,
    })))
}

fn decode_soa<E>(mut rdata: WireCursor<'_>, names: &E) -> Result<RecordData, AnyParseError>
    where E: NameExpander + ?Sized {
    let mname = rdata.read_name(names)?;
    let rname = rdata.read_name(names)?;
    // serial, refresh, retry, expire, minimum
    let mut numbers = rdata.split(5 * 4)?;
    Ok(RecordData::SOA(SoaData {
        mname,
        rname,
        serial: numbers.read_u32()?,
        refresh: numbers.read_u32()?,
        retry: numbers.read_u32()?,
        expire: numbers.read_u32()?,
        minimum: numbers.read_u32()?,
    }))
}

// TXT data is sequence of <character-string>s which has to fill data exactly.
fn decode_txt(mut rdata: WireCursor<'_>) -> Result<RecordData, AnyParseError> {
    let mut strings = Vec::new();
    while !rdata.is_empty() {
        let len = rdata.read_u8()? as usize;
        let text = rdata.take(len)?;
        strings.try_reserve(1)?;
        strings.push(copy_bytes(text)?);
    }
    Ok(RecordData::TXT(strings))
}

fn decode_unknown(mut rdata: WireCursor<'_>) -> Result<RecordData, AnyParseError> {
    Ok(RecordData::Unknown(copy_bytes(rdata.take_rest())?))
}

// length is controlled by sender so allocation failure is reported instead of aborting
fn copy_bytes(data: &[u8]) -> Result<Vec<u8>, AnyParseError> {
    let mut res = Vec::new();
    res.try_reserve_exact(data.len())?;
    res.extend_from_slice(data);
    Ok(res)
}
