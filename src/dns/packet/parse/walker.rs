use tracing::{debug, trace};

use crate::dns::packet::parse::cursor::WireCursor;
use crate::dns::packet::parse::frame::Frame;
use crate::dns::packet::parse::names::{NameDecompressor, NameExpander};
use crate::dns::packet::parse::rdata::decode_rdata;
use crate::dns::packet::parse::AnyParseError;
use crate::dns::packet::primitives::{AnyDnsClass, AnyDnsType, RecordKind};
use crate::dns::{AnyRecord, AnyReply, DecodeOptions, OptRecordPolicy, Section};

// type, class, ttl and data length
const RR_FIXED_LEN: usize = 10;

/// parse_any_reply decodes records from answer, authority and additional sections of
/// response to single question query.
///
/// # Result order
/// Result order is preserved. It's same just like in original data.
///
/// # Errors
/// Decoding is all or nothing: if any record is malformed no records are returned.
/// Response without any record yields `AnyParseError::NoData`.
pub fn parse_any_reply(data: &[u8]) -> Result<AnyReply, AnyParseError> {
    parse_any_reply_with(data, &DecodeOptions::default(), &NameDecompressor::new())
}

/// parse_any_reply_with works like `parse_any_reply` but with given options and name expander.
pub fn parse_any_reply_with<E>(
    data: &[u8],
    options: &DecodeOptions,
    names: &E,
) -> Result<AnyReply, AnyParseError>
    where E: NameExpander + ?Sized {
    let frame = Frame::validate(data, names)?;
    let mut cursor = WireCursor::at(data, frame.records_start)?;

    let mut records = Vec::new();
    for index in 0..frame.record_count() {
        // OPT records use their own data format, leave them and whatever follows undecoded
        if options.opt_records == OptRecordPolicy::Stop && cursor.at_opt_record() {
            debug!(index, question = %frame.question, "OPT record reached, stopping");
            break;
        }

        match read_record(&mut cursor, frame.section_of(index), names, options) {
            Ok(Some(record)) => {
                records.try_reserve(1)?;
                records.push(record);
            }
            Ok(None) => {}
            Err(err) => {
                debug!(index, question = %frame.question, error = %err, "record walk aborted");
                return Err(err);
            }
        }
    }

    if records.is_empty() {
        return Err(AnyParseError::NoData);
    }
    Ok(AnyReply { records })
}

fn read_record<E>(
    cursor: &mut WireCursor<'_>,
    section: Section,
    names: &E,
    options: &DecodeOptions,
) -> Result<Option<AnyRecord>, AnyParseError>
    where E: NameExpander + ?Sized {
    let name = cursor.read_name(names)?;

    let mut fixed = cursor.split(RR_FIXED_LEN)?;
    let ty = AnyDnsType::from(fixed.read_u16()?);
    let cls = AnyDnsClass::from(fixed.read_u16()?);
    let ttl = fixed.read_u32()?;
    let rdata_len = fixed.read_u16()? as usize;

    let rdata = cursor.split(rdata_len)?;
    let kind = RecordKind::classify(ty, cls);
    let data = match decode_rdata(kind, rdata, names, options.short_srv)? {
        Some(data) => data,
        None => return Ok(None),
    };

    trace!(%kind, %name, ttl, "decoded record");
    Ok(Some(AnyRecord::new(kind, section, name, cls, ttl, data)))
}
