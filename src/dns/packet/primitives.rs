use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// flag_enum creates enum which may be either known or unknown(yet) flag.
macro_rules! flag_enum {
    (
        $name:ident, $any_name:ident: $val_ty:ty {
             $(
                $variant_name:ident = $variant_val:tt
             ),*
        }

    ) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                $variant_name = ($variant_val) as isize
            ),*
        }

        impl $name {
            #[inline]
            pub fn into_num(self) -> $val_ty {
                self.into()
            }

            /// name returns mnemonic of given value, exactly as it's spelled in the variant.
            pub fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant_name => stringify!($variant_name)
                    ),*
                }
            }
        }

        impl From<$name> for $val_ty {
            #[inline]
            fn from(val: $name) -> $val_ty {
                match val {
                    $(
                        $name::$variant_name => $variant_val
                    ),*
                }
            }
        }

        impl TryFrom<$val_ty> for $name {
            type Error = ();

            #[inline]
            fn try_from(val: $val_ty) -> Result<Self, Self::Error> {
                match val {
                    $(
                        $variant_val => Ok(Self::$variant_name),
                    )*
                    _ => Err(()),
                }
            }
        }

        impl From<$name> for $any_name {
            fn from(data: $name) -> $any_name {
                $any_name::Known(data)
            }
        }

        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub enum $any_name {
            Known($name),
            Unknown($val_ty)
        }

        impl $any_name {
            pub fn into_canonical(self) -> Self {
                match self {
                    Self::Known(v) => Self::Known(v),
                    Self::Unknown(v) => match $name::try_from(v) {
                        Ok(new_v) => Self::Known(new_v),
                        Err(_) => Self::Unknown(v),
                    }
                }
            }
        }

        impl From<$any_name> for $val_ty {
            #[inline]
            fn from(val: $any_name) -> $val_ty {
                match val {
                    $any_name::Known(v) => v.into(),
                    $any_name::Unknown(v) => v,
                }
            }
        }

        impl From<$val_ty> for $any_name {
            #[inline]
            fn from(val: $val_ty) -> Self {
                Self::Unknown(val).into_canonical()
            }
        }
    }
}

/// MaybeValidString contains either `&str` or `&[u8]` in case data was not valid utf8.
/// Both types are wrapped in cows.
///
/// Rendered record values use it since TXT and unknown record data are raw bytes which may
/// contain zeros, while everything else renders to plain ASCII.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(From)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MaybeValidString<'a> {
    Parsed(Cow<'a, str>),
    Raw(Cow<'a, [u8]>),
}

impl<'a> From<&'a str> for MaybeValidString<'a> {
    fn from(text: &'a str) -> Self {
        MaybeValidString::Parsed(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a [u8]> for MaybeValidString<'a> {
    fn from(data: &'a [u8]) -> Self {
        MaybeValidString::Raw(Cow::Borrowed(data))
    }
}

impl From<String> for MaybeValidString<'static> {
    fn from(text: String) -> Self {
        MaybeValidString::Parsed(Cow::Owned(text))
    }
}

impl<'a> MaybeValidString<'a> {
    /// into_canonical turns raw data which happens to be valid utf8 into `Parsed` variant.
    pub fn into_canonical(self) -> Self {
        match self {
            MaybeValidString::Parsed(text) => Self::Parsed(text),
            MaybeValidString::Raw(Cow::Borrowed(data)) => match std::str::from_utf8(data) {
                Ok(text) => Self::Parsed(Cow::Borrowed(text)),
                Err(_) => Self::Raw(Cow::Borrowed(data)),
            },
            MaybeValidString::Raw(Cow::Owned(data)) => match String::from_utf8(data) {
                Ok(text) => Self::Parsed(Cow::Owned(text)),
                Err(e) => Self::Raw(Cow::Owned(e.into_bytes())),
            },
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MaybeValidString::Parsed(text) => text.as_bytes(),
            MaybeValidString::Raw(data) => data.as_ref(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MaybeValidString::Parsed(text) => Some(text.as_ref()),
            MaybeValidString::Raw(_) => None,
        }
    }

    /// len returns length in bytes, embedded zeros included.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for MaybeValidString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeValidString::Parsed(text) => f.write_str(text),
            MaybeValidString::Raw(data) => f.write_str(&String::from_utf8_lossy(data)),
        }
    }
}

flag_enum!(
    DnsType, AnyDnsType: u16 {
        A = 1,
        NS = 2,
        CNAME = 5,
        SOA = 6,
        PTR = 12,
        MX = 15,
        TXT = 16,
        AAAA = 28,
        SRV = 33,
        OPT = 41,
        ANY = 255
    }
);

impl DnsType {
    /// is_decodable returns true for types which have their own decoder.
    /// Everything else is rendered as raw data.
    pub fn is_decodable(self) -> bool {
        match self {
            DnsType::A
            | DnsType::NS
            | DnsType::CNAME
            | DnsType::SOA
            | DnsType::PTR
            | DnsType::MX
            | DnsType::TXT
            | DnsType::AAAA
            | DnsType::SRV => true,
            DnsType::OPT | DnsType::ANY => false,
        }
    }
}

flag_enum!(
    DnsClass, AnyDnsClass: u16 {
        IN = 1,
        CS = 2,
        CH = 3,
        HS = 4
    }
);

flag_enum!(
    QueryKind, AnyQueryKind: u8 {
        StandardQuery = 0,
        InverseQuery = 1,
        ServerStatusRequest = 2
    }
);

/// RecordKind says which decoder handled a record.
///
/// Only records of class `IN` with one of decodable types get their own kind.
/// Anything else falls back to `Unknown` which keeps raw numbers for the tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RecordKind {
    Known(DnsType),
    Unknown { ty: u16, cls: AnyDnsClass },
}

impl RecordKind {
    pub fn classify(ty: AnyDnsType, cls: AnyDnsClass) -> Self {
        match (ty.into_canonical(), cls.into_canonical()) {
            (AnyDnsType::Known(ty), AnyDnsClass::Known(DnsClass::IN)) if ty.is_decodable() => {
                RecordKind::Known(ty)
            }
            (ty, cls) => RecordKind::Unknown { ty: ty.into(), cls },
        }
    }

    /// tag renders short kind name like `A`, `UNK_IN_99` or `UNK_3_16`.
    ///
    /// Result never exceeds 15 characters.
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Known(ty) => f.write_str(ty.name()),
            RecordKind::Unknown { ty, cls: AnyDnsClass::Known(DnsClass::IN) } => {
                write!(f, "UNK_IN_{}", ty)
            }
            RecordKind::Unknown { ty, cls } => write!(f, "UNK_{}_{}", u16::from(*cls), ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// SoaData fields are named after RFC1035: `mname` is primary name server,
/// `rname` is mailbox of zone's hostmaster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// RecordData is structured form of single decoded record's data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),

    CNAME(String),
    NS(String),
    PTR(String),
    MX { priority: u16, exchange: String },
    SRV(SrvData),
    SOA(SoaData),

    /// Character strings without their length prefixes.
    TXT(Vec<Vec<u8>>),

    /// Raw data of anything that has no decoder.
    Unknown(Vec<u8>),
}

impl RecordData {
    /// render converts data into value displayed by "any record" consumers.
    ///
    /// TXT renders to its wire bytes with each length prefix replaced by `|`,
    /// so result is exactly as long as record's data.
    pub fn render(&self) -> MaybeValidString<'static> {
        match self {
            RecordData::A(addr) => addr.to_string().into(),
            RecordData::AAAA(addr) => addr.to_string().into(),
            RecordData::CNAME(name) | RecordData::NS(name) | RecordData::PTR(name) => {
                name.clone().into()
            }
            RecordData::MX { priority, exchange } => format!("{} {}", priority, exchange).into(),
            RecordData::SRV(srv) => format!(
                "{} {} {} {}",
                srv.priority, srv.weight, srv.port, srv.target
            ).into(),
            RecordData::SOA(soa) => format!(
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ).into(),
            RecordData::TXT(strings) => {
                let mut res = Vec::with_capacity(strings.iter().map(|s| s.len() + 1).sum());
                for s in strings {
                    res.push(b'|');
                    res.extend_from_slice(s);
                }
                MaybeValidString::Raw(Cow::Owned(res)).into_canonical()
            }
            RecordData::Unknown(data) => {
                MaybeValidString::Raw(Cow::Owned(data.clone())).into_canonical()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_numbers_are_canonicalized() {
        assert_eq!(AnyDnsType::from(28), AnyDnsType::Known(DnsType::AAAA));
        assert_eq!(AnyDnsType::from(99), AnyDnsType::Unknown(99));
        assert_eq!(AnyDnsType::Unknown(33).into_canonical(), AnyDnsType::Known(DnsType::SRV));
        assert_eq!(u16::from(AnyDnsClass::Known(DnsClass::CH)), 3);
        assert_eq!(DnsType::MX.into_num(), 15);
        assert_eq!(DnsType::AAAA.name(), "AAAA");
    }

    #[test]
    fn test_kind_tags() {
        let tag = |ty: u16, cls: u16| RecordKind::classify(ty.into(), cls.into()).tag();
        assert_eq!(tag(1, 1), "A");
        assert_eq!(tag(6, 1), "SOA");
        assert_eq!(tag(99, 1), "UNK_IN_99");
        assert_eq!(tag(16, 3), "UNK_3_16");
        assert_eq!(tag(41, 1), "UNK_IN_41");
        assert_eq!(tag(41, 4096), "UNK_4096_41");
        assert_eq!(tag(65535, 65535), "UNK_65535_65535");
        assert!(tag(65535, 65535).len() <= 15);
    }

    #[test]
    fn test_txt_renders_with_separators() {
        let data = RecordData::TXT(vec![b"ab".to_vec(), b"xyz".to_vec()]);
        let value = data.render();
        assert_eq!(value.len(), 7);
        assert_eq!(value.as_str(), Some("|ab|xyz"));
    }

    #[test]
    fn test_raw_values_stay_raw_when_not_utf8() {
        let value = RecordData::Unknown(vec![0xff, 0x00, 0x41]).render();
        assert_eq!(value.as_bytes(), &[0xff, 0x00, 0x41]);
        assert_eq!(value.as_str(), None);

        let value = RecordData::Unknown(b"v=spf1".to_vec()).render();
        assert_eq!(value, MaybeValidString::from("v=spf1"));
    }

    #[test]
    fn test_srv_and_mx_render() {
        let srv = RecordData::SRV(SrvData {
            priority: 10,
            weight: 60,
            port: 5060,
            target: String::from("bigbox.example.com"),
        });
        assert_eq!(srv.render().to_string(), "10 60 5060 bigbox.example.com");

        let mx = RecordData::MX { priority: 10, exchange: String::from("mail.example.com") };
        assert_eq!(mx.render().to_string(), "10 mail.example.com");
    }
}
