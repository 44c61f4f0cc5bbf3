#![allow(dead_code)]

const TYPE_CNAME: u16 = 5;
const TYPE_MX: u16 = 15;
const TYPE_TXT: u16 = 16;

/// Pointer to the question name, which always starts right after the header.
const QNAME_POINTER: [u8; 2] = [0xC0, 0x0C];

pub fn query_id(query: &[u8]) -> u16 {
    u16::from_be_bytes([query[0], query[1]])
}

/// Builds a response that echoes a query's id and question section.
pub struct ResponseBuilder {
    id: u16,
    flags: u16,
    question: Vec<u8>,
    question_count: u16,
    answers: Vec<Vec<u8>>,
    claimed_answers: Option<u16>,
}

impl ResponseBuilder {
    pub fn for_query(query: &[u8]) -> Self {
        Self {
            id: query_id(query),
            flags: 0x8180,
            question: query[12..].to_vec(),
            question_count: 1,
            answers: Vec::new(),
            claimed_answers: None,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & !0x000F) | rcode as u16;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.flags |= 0x0200;
        self
    }

    /// Clears QR so the message reads as a query.
    pub fn not_a_response(mut self) -> Self {
        self.flags &= !0x8000;
        self
    }

    pub fn without_question(mut self) -> Self {
        self.question.clear();
        self.question_count = 0;
        self
    }

    /// Overrides ANCOUNT without adding records.
    pub fn claim_answers(mut self, count: u16) -> Self {
        self.claimed_answers = Some(count);
        self
    }

    pub fn cname(self, target: &str) -> Self {
        self.answer(TYPE_CNAME, encode_name(target))
    }

    pub fn mx(self, preference: u16, exchange: &str) -> Self {
        let mut rdata = preference.to_be_bytes().to_vec();
        rdata.extend_from_slice(&encode_name(exchange));
        self.answer(TYPE_MX, rdata)
    }

    /// MX whose exchange is `label` followed by a pointer to the question name.
    pub fn mx_compressed(self, preference: u16, label: &str) -> Self {
        let mut rdata = preference.to_be_bytes().to_vec();
        rdata.push(label.len() as u8);
        rdata.extend_from_slice(label.as_bytes());
        rdata.extend_from_slice(&QNAME_POINTER);
        self.answer(TYPE_MX, rdata)
    }

    /// One TXT record made of the given character-strings.
    pub fn txt(self, segments: &[&str]) -> Self {
        let mut rdata = Vec::new();
        for segment in segments {
            rdata.push(segment.len() as u8);
            rdata.extend_from_slice(segment.as_bytes());
        }
        self.answer(TYPE_TXT, rdata)
    }

    /// A record owned by the question name with arbitrary type and rdata.
    pub fn answer(mut self, record_type: u16, rdata: Vec<u8>) -> Self {
        let mut rr = QNAME_POINTER.to_vec();
        rr.extend_from_slice(&record_type.to_be_bytes());
        rr.extend_from_slice(&[0x00, 0x01]);
        rr.extend_from_slice(&300u32.to_be_bytes());
        rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        rr.extend_from_slice(&rdata);
        self.answers.push(rr);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let answer_count = self
            .claimed_answers
            .unwrap_or(self.answers.len() as u16);

        let mut bytes = Vec::with_capacity(512);
        bytes.extend_from_slice(&self.id.to_be_bytes());
        bytes.extend_from_slice(&self.flags.to_be_bytes());
        bytes.extend_from_slice(&self.question_count.to_be_bytes());
        bytes.extend_from_slice(&answer_count.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&self.question);
        for rr in &self.answers {
            bytes.extend_from_slice(rr);
        }
        bytes
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes
}
