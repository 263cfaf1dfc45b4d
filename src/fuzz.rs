use crate::dns::parse_any_reply;

pub fn fuzz_parse_any_reply(data: &[u8]) {
    if let Ok(reply) = parse_any_reply(data) {
        assert!(!reply.is_empty());
        for record in reply.iter() {
            assert!(record.tag().len() <= 15);
        }
        let _ = reply.into_chain();
    }
}
