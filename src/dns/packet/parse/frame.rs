use crate::dns::packet::parse::cursor::WireCursor;
use crate::dns::packet::parse::names::NameExpander;
use crate::dns::packet::parse::AnyParseError;
use crate::dns::Section;

pub(crate) const HEADER_LEN: usize = 12;

// type and class
const QUESTION_FIXED_LEN: usize = 4;

/// Frame holds what header and question tell about layout of the rest of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub question: String,
    pub answers: u16,
    pub authorities: u16,
    pub additionals: u16,

    /// records_start is offset of first answer record.
    pub records_start: usize,
}

impl Frame {
    /// validate checks header and sole question of given message.
    ///
    /// Only messages with exactly one question are accepted.
    pub fn validate<E>(msg: &[u8], names: &E) -> Result<Self, AnyParseError>
        where E: NameExpander + ?Sized {
        if msg.len() < HEADER_LEN {
            return Err(AnyParseError::Malformed);
        }
        let mut cursor = WireCursor::new(msg);
        // id and flags are of no interest here
        cursor.skip(4)?;
        let questions = cursor.read_u16()?;
        let answers = cursor.read_u16()?;
        let authorities = cursor.read_u16()?;
        let additionals = cursor.read_u16()?;
        if questions != 1 {
            return Err(AnyParseError::Malformed);
        }

        let question = cursor.read_name(names)?;
        cursor.skip(QUESTION_FIXED_LEN)?;

        Ok(Frame {
            question,
            answers,
            authorities,
            additionals,
            records_start: cursor.position(),
        })
    }

    pub fn record_count(&self) -> usize {
        self.answers as usize + self.authorities as usize + self.additionals as usize
    }

    /// section_of tells which section record with given index (counted across sections) is in.
    pub fn section_of(&self, index: usize) -> Section {
        if index < self.answers as usize {
            Section::Answer
        } else if index < self.answers as usize + self.authorities as usize {
            Section::Authority
        } else {
            Section::Additional
        }
    }
}

#[cfg(test)]
mod test {
    use crate::dns::packet::parse::names::NameDecompressor;
    use crate::dns::packet::parse::testing::ResponseBuilder;

    use super::*;

    fn validate(msg: &[u8]) -> Result<Frame, AnyParseError> {
        Frame::validate(msg, &NameDecompressor::new())
    }

    #[test]
    fn test_short_messages_are_malformed() {
        let msg = ResponseBuilder::new("example.com").build();
        for len in 0..HEADER_LEN {
            assert_eq!(validate(&msg[..len]), Err(AnyParseError::Malformed), "length {}", len);
        }
    }

    #[test]
    fn test_exactly_one_question_is_required() {
        let mut msg = ResponseBuilder::new("example.com").build();
        for count in [0u16, 2, 0xffff].iter() {
            msg[4..6].copy_from_slice(&count.to_be_bytes());
            assert_eq!(validate(&msg), Err(AnyParseError::Malformed));
        }
    }

    #[test]
    fn test_locates_records() {
        let msg = ResponseBuilder::new("example.com")
            .answer(1, &[93, 184, 216, 34])
            .authority(2, b"\x03ns1\xc0\x0c")
            .additional(1, &[192, 0, 2, 1])
            .build();
        let frame = validate(&msg).unwrap();
        assert_eq!(frame.question, "example.com");
        assert_eq!(frame.record_count(), 3);
        // header + name + type and class
        assert_eq!(frame.records_start, 12 + 13 + 4);
        assert_eq!(frame.section_of(0), Section::Answer);
        assert_eq!(frame.section_of(1), Section::Authority);
        assert_eq!(frame.section_of(2), Section::Additional);
    }

    #[test]
    fn test_question_fixed_fields_must_fit() {
        let msg = ResponseBuilder::new("example.com").build();
        assert!(validate(&msg).is_ok());
        for cut in 1..=QUESTION_FIXED_LEN {
            assert_eq!(validate(&msg[..msg.len() - cut]), Err(AnyParseError::Malformed));
        }
    }

    #[test]
    fn test_question_name_errors_propagate() {
        let mut msg = ResponseBuilder::new("example.com").build();
        // turn first label length into reserved label type
        msg[HEADER_LEN] = 0x47;
        assert_eq!(validate(&msg), Err(AnyParseError::BadName));
    }
}
