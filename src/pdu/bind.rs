// ABOUTME: bind_transmitter / bind_receiver / bind_transceiver request and response bodies
// ABOUTME: All three share the identical wire layout; only the command_id differs

use super::{NumericPlanIndicator, TypeOfNumber};
use crate::codec::{decode_cstring, decode_u8, encode_cstring, encode_u8};
use crate::error::CodecError;
use bytes::BytesMut;
use std::io::Cursor;

/// The interface version this core speaks: SMPP v3.4.
pub const INTERFACE_VERSION: u8 = 0x34;

const SYSTEM_ID_WIDTH: usize = 16;
const PASSWORD_WIDTH: usize = 9;
const SYSTEM_TYPE_WIDTH: usize = 13;
const ADDRESS_RANGE_WIDTH: usize = 41;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindMode {
    Transmitter,
    Receiver,
    Transceiver,
}

/// Body shared by all three bind requests (spec §4.F).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRequest {
    pub system_id: String,
    pub password: String,
    pub system_type: String,
    pub interface_version: u8,
    pub addr_ton: TypeOfNumber,
    pub addr_npi: NumericPlanIndicator,
    pub address_range: String,
}

impl BindRequest {
    pub fn new(system_id: impl Into<String>, password: impl Into<String>) -> Self {
        BindRequest {
            system_id: system_id.into(),
            password: password.into(),
            system_type: String::new(),
            interface_version: INTERFACE_VERSION,
            addr_ton: TypeOfNumber::Unknown,
            addr_npi: NumericPlanIndicator::Unknown,
            address_range: String::new(),
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.system_id);
        encode_cstring(buf, &self.password);
        encode_cstring(buf, &self.system_type);
        encode_u8(buf, self.interface_version);
        encode_u8(buf, self.addr_ton as u8);
        encode_u8(buf, self.addr_npi as u8);
        encode_cstring(buf, &self.address_range);
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let system_id = decode_cstring(cur, SYSTEM_ID_WIDTH, "system_id")?;
        let password = decode_cstring(cur, PASSWORD_WIDTH, "password")?;
        let system_type = decode_cstring(cur, SYSTEM_TYPE_WIDTH, "system_type")?;
        let interface_version = decode_u8(cur, "interface_version")?;
        let raw_ton = decode_u8(cur, "addr_ton")?;
        let raw_npi = decode_u8(cur, "addr_npi")?;
        let address_range = decode_cstring(cur, ADDRESS_RANGE_WIDTH, "address_range")?;
        Ok(BindRequest {
            system_id,
            password,
            system_type,
            interface_version,
            addr_ton: TypeOfNumber::try_from(raw_ton).unwrap_or(TypeOfNumber::Unknown),
            addr_npi: NumericPlanIndicator::try_from(raw_npi).unwrap_or(NumericPlanIndicator::Unknown),
            address_range,
        })
    }
}

/// `bind_*_resp` body: an SMSC system_id plus optional TLVs. Empty when the
/// response carries a failure status (spec §4.D parse_bind_resp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindResponse {
    pub system_id: String,
}

impl BindResponse {
    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.system_id);
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if (cur.get_ref().len() as u64 - cur.position()) == 0 {
            return Ok(BindResponse {
                system_id: String::new(),
            });
        }
        let system_id = decode_cstring(cur, SYSTEM_ID_WIDTH, "system_id")?;
        Ok(BindResponse { system_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_request_roundtrip() {
        let req = BindRequest::new("smppclient1", "secret07");
        let mut buf = BytesMut::new();
        req.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = BindRequest::decode(&mut cur).unwrap();
        assert_eq!(decoded, req);
        assert_eq!(decoded.interface_version, INTERFACE_VERSION);
    }

    #[test]
    fn bind_response_empty_body_on_failure() {
        let buf = BytesMut::new();
        let mut cur = Cursor::new(&buf[..]);
        let resp = BindResponse::decode(&mut cur).unwrap();
        assert_eq!(resp.system_id, "");
    }
}
