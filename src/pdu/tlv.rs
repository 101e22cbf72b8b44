// ABOUTME: Optional TLV (tag-length-value) parameters appended to PDU bodies
// ABOUTME: Tag constants here are the values spec'd for this core, not every registered SMPP tag

use crate::error::CodecError;
use bytes::{Buf, Bytes, BytesMut};
use std::io::Cursor;

/// A single optional parameter: `tag (u16) || length (u16) || value (length bytes)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub tag: u16,
    pub value: Bytes,
}

impl Tlv {
    pub fn new(tag: u16, value: impl Into<Bytes>) -> Self {
        Tlv {
            tag,
            value: value.into(),
        }
    }

    pub fn u8(tag: u16, value: u8) -> Self {
        Tlv::new(tag, Bytes::from(vec![value]))
    }

    pub fn u16(tag: u16, value: u16) -> Self {
        Tlv::new(tag, Bytes::from(value.to_be_bytes().to_vec()))
    }

    pub fn as_u8(&self) -> Option<u8> {
        self.value.first().copied()
    }

    pub fn as_u16(&self) -> Option<u16> {
        if self.value.len() < 2 {
            return None;
        }
        Some(u16::from_be_bytes([self.value[0], self.value[1]]))
    }

    pub fn encoded_size(&self) -> usize {
        4 + self.value.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.tag.to_be_bytes());
        buf.extend_from_slice(&(self.value.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.value);
    }

    /// Decodes one TLV from the cursor. Returns `Ok(None)` at end of input —
    /// TLVs are a trailing sequence of unknown length, so callers loop until
    /// this returns `None`.
    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Option<Self>, CodecError> {
        let remaining = (cur.get_ref().len() as u64 - cur.position()) as usize;
        if remaining == 0 {
            return Ok(None);
        }
        if remaining < 4 {
            return Err(CodecError::TruncatedBody { field: "tlv_header" });
        }
        let tag = cur.get_u16();
        let length = cur.get_u16() as usize;
        let remaining_after = (cur.get_ref().len() as u64 - cur.position()) as usize;
        if remaining_after < length {
            return Err(CodecError::TruncatedBody { field: "tlv_value" });
        }
        let mut value = vec![0u8; length];
        cur.copy_to_slice(&mut value);
        Ok(Some(Tlv {
            tag,
            value: Bytes::from(value),
        }))
    }

    /// Decodes every TLV remaining in the cursor.
    pub fn decode_all(cur: &mut Cursor<&[u8]>) -> Result<Vec<Self>, CodecError> {
        let mut out = Vec::new();
        while let Some(tlv) = Tlv::decode(cur)? {
            out.push(tlv);
        }
        Ok(out)
    }
}

/// Well-known tag values relevant to this core (spec §3).
pub mod tags {
    pub const MESSAGE_PAYLOAD: u16 = 0x0424;
    pub const SAR_MSG_REF_NUM: u16 = 0x020C;
    pub const SAR_TOTAL_SEGMENTS: u16 = 0x020E;
    pub const SAR_SEGMENT_SEQNUM: u16 = 0x020F;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tlv_roundtrip() {
        let tlv = Tlv::u16(tags::SAR_MSG_REF_NUM, 42);
        let mut buf = BytesMut::new();
        tlv.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = Tlv::decode(&mut cur).unwrap().unwrap();
        assert_eq!(decoded, tlv);
        assert_eq!(decoded.as_u16(), Some(42));
    }

    #[test]
    fn decode_all_stops_at_end() {
        let mut buf = BytesMut::new();
        Tlv::u8(tags::SAR_TOTAL_SEGMENTS, 2).encode(&mut buf);
        Tlv::u8(tags::SAR_SEGMENT_SEQNUM, 1).encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let tlvs = Tlv::decode_all(&mut cur).unwrap();
        assert_eq!(tlvs.len(), 2);
    }
}
