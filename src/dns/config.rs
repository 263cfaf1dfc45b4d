//! Knobs deciding how strictly responses are decoded.

/// What to do with SRV record whose data can't even hold priority, weight and port.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ShortSrvPolicy {
    /// Fail whole response as malformed.
    Reject,
    /// Leave record out and keep walking.
    Skip,
}

/// What to do once EDNS OPT pseudo-record is reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum OptRecordPolicy {
    /// Stop walking, records decoded so far are the result.
    Stop,
    /// Decode it like any other record of unknown type.
    Decode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct DecodeOptions {
    pub short_srv: ShortSrvPolicy,
    pub opt_records: OptRecordPolicy,
}

impl DecodeOptions {
    /// lenient returns options which silently skip short SRV records instead of failing.
    pub fn lenient() -> Self {
        Self {
            short_srv: ShortSrvPolicy::Skip,
            ..Self::default()
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            short_srv: ShortSrvPolicy::Reject,
            opt_records: OptRecordPolicy::Stop,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let options = DecodeOptions::default();
        assert_eq!(options.short_srv, ShortSrvPolicy::Reject);
        assert_eq!(options.opt_records, OptRecordPolicy::Stop);
        assert_eq!(DecodeOptions::lenient().short_srv, ShortSrvPolicy::Skip);
        assert_eq!(DecodeOptions::lenient().opt_records, OptRecordPolicy::Stop);
    }
}
