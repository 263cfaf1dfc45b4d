use std::fmt;

use crate::dns::packet::primitives::{AnyDnsClass, MaybeValidString, RecordData, RecordKind};

/// Section of a DNS message given record was read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

/// AnyRecord is single resource record decoded from a response.
///
/// `value` is what "any record" consumers display; `data` keeps the same
/// information in structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AnyRecord {
    pub kind: RecordKind,
    pub section: Section,

    /// name is the owner name, decompressed
    pub name: String,
    pub cls: AnyDnsClass,
    pub ttl: u32,
    pub data: RecordData,
    pub value: MaybeValidString<'static>,
}

impl AnyRecord {
    pub fn new(
        kind: RecordKind,
        section: Section,
        name: String,
        cls: AnyDnsClass,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        let value = data.render();
        Self {
            kind,
            section,
            name,
            cls,
            ttl,
            data,
            value,
        }
    }

    #[inline]
    pub fn tag(&self) -> String {
        self.kind.tag()
    }
}

impl fmt::Display for AnyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.name, self.ttl, self.kind, self.value)
    }
}

/// AnyReply is ordered list of records decoded from answer, authority and additional
/// sections of a response.
///
/// # Result order
/// Order is same as in original data: sections first, then records within section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AnyReply {
    pub records: Vec<AnyRecord>,
}

impl AnyReply {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnyRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<AnyRecord> {
        self.records
    }

    /// into_chain converts reply into singly linked list of exclusively owned nodes.
    ///
    /// Returns `None` for empty reply.
    pub fn into_chain(self) -> Option<Box<AnyRecordNode>> {
        let mut head = None;
        for record in self.records.into_iter().rev() {
            head = Some(Box::new(AnyRecordNode { record, next: head }));
        }
        head
    }
}

impl IntoIterator for AnyReply {
    type Item = AnyRecord;
    type IntoIter = std::vec::IntoIter<AnyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnyReply {
    type Item = &'a AnyRecord;
    type IntoIter = std::slice::Iter<'a, AnyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// AnyRecordNode is a link of chain produced by `AnyReply::into_chain`.
///
/// Owner of the head owns whole chain. Dropping the head releases all nodes.
#[derive(Debug)]
pub struct AnyRecordNode {
    pub record: AnyRecord,
    pub next: Option<Box<AnyRecordNode>>,
}

impl AnyRecordNode {
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { node: Some(self) }
    }
}

// Default drop would recurse once per node.
impl Drop for AnyRecordNode {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

pub struct ChainIter<'a> {
    node: Option<&'a AnyRecordNode>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a AnyRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(&node.record)
    }
}
