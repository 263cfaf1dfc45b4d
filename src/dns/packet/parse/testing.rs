//! Helpers building responses for tests.

use crate::dns::packet::query::AnyQuery;

/// Pointer to question name, which always starts right after header.
pub(crate) const QNAME: &[u8] = &[0xc0, 0x0c];

pub(crate) fn encode_name(name: &str) -> Vec<u8> {
    let mut res = Vec::new();
    for l in name.split('.').filter(|l| !l.is_empty()) {
        res.push(l.len() as u8);
        res.extend_from_slice(l.as_bytes());
    }
    res.push(0);
    res
}

pub(crate) struct ResponseBuilder {
    buf: Vec<u8>,
    counts: [u16; 3],
}

impl ResponseBuilder {
    pub fn new(question: &str) -> Self {
        let mut buf = Vec::new();
        AnyQuery::make_any(question)
            .to_dns_binary(&mut buf)
            .expect("question should encode");
        // QR and RA bits
        buf[2] |= 0x80;
        buf[3] |= 0x80;
        Self { buf, counts: [0; 3] }
    }

    /// record appends record to section with given index: 0 answer, 1 authority, 2 additional.
    pub fn record(mut self, section: usize, owner: &[u8], ty: u16, cls: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.buf.extend_from_slice(owner);
        self.buf.extend_from_slice(&ty.to_be_bytes());
        self.buf.extend_from_slice(&cls.to_be_bytes());
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(rdata);
        self.counts[section] += 1;
        self
    }

    pub fn answer(self, ty: u16, rdata: &[u8]) -> Self {
        self.record(0, QNAME, ty, 1, 300, rdata)
    }

    pub fn authority(self, ty: u16, rdata: &[u8]) -> Self {
        self.record(1, QNAME, ty, 1, 300, rdata)
    }

    pub fn additional(self, ty: u16, rdata: &[u8]) -> Self {
        self.record(2, QNAME, ty, 1, 300, rdata)
    }

    /// raw appends bytes without touching counts.
    pub fn raw(mut self, data: &[u8]) -> Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// counts overrides counts of answer, authority and additional sections.
    pub fn counts(mut self, an: u16, ns: u16, ar: u16) -> Self {
        self.counts = [an, ns, ar];
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        for (i, count) in self.counts.iter().enumerate() {
            let at = 6 + 2 * i;
            self.buf[at..at + 2].copy_from_slice(&count.to_be_bytes());
        }
        self.buf
    }
}
