// ABOUTME: query_sm request/response bodies for message-status lookups

use super::address::Address;
use crate::codec::{decode_cstring, decode_u8, encode_cstring, encode_u8};
use crate::error::CodecError;
use bytes::BytesMut;
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySm {
    pub message_id: String,
    pub source_addr: Address,
}

impl QuerySm {
    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        self.source_addr.encode(buf);
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let message_id = decode_cstring(cur, 65, "message_id")?;
        let source_addr = Address::decode(cur, "source_addr")?;
        Ok(QuerySm {
            message_id,
            source_addr,
        })
    }
}

/// `query_sm_resp` body (spec §4.D parse_query_resp):
/// `(message_id, final_date_string, message_state, error_code)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySmResponse {
    pub message_id: String,
    pub final_date: String,
    pub message_state: u8,
    pub error_code: u8,
}

impl QuerySmResponse {
    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_cstring(buf, &self.final_date);
        encode_u8(buf, self.message_state);
        encode_u8(buf, self.error_code);
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let message_id = decode_cstring(cur, 65, "message_id")?;
        let final_date = decode_cstring(cur, 17, "final_date")?;
        let message_state = decode_u8(cur, "message_state")?;
        let error_code = decode_u8(cur, "error_code")?;
        Ok(QuerySmResponse {
            message_id,
            final_date,
            message_state,
            error_code,
        })
    }
}

/// Named `message_state` values (SMPP v3.4 §5.2.28), consulted by `query_status`.
pub mod message_state {
    pub const ENROUTE: u8 = 1;
    pub const DELIVERED: u8 = 2;
    pub const EXPIRED: u8 = 3;
    pub const DELETED: u8 = 4;
    pub const UNDELIVERABLE: u8 = 5;
    pub const ACCEPTED: u8 = 6;
    pub const UNKNOWN: u8 = 7;
    pub const REJECTED: u8 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{NumericPlanIndicator, TypeOfNumber};

    #[test]
    fn query_resp_roundtrip_s6() {
        let resp = QuerySmResponse {
            message_id: "msg123".to_string(),
            final_date: "260124120000000+".to_string(),
            message_state: message_state::DELIVERED,
            error_code: 0,
        };
        let mut buf = BytesMut::new();
        resp.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = QuerySmResponse::decode(&mut cur).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn query_request_roundtrip() {
        let req = QuerySm {
            message_id: "msg123".to_string(),
            source_addr: Address::new("1234", TypeOfNumber::International, NumericPlanIndicator::Isdn)
                .unwrap(),
        };
        let mut buf = BytesMut::new();
        req.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = QuerySm::decode(&mut cur).unwrap();
        assert_eq!(decoded, req);
    }
}
