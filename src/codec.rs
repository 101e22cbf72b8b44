// ABOUTME: Wire-level primitive encode/decode helpers and the PDU header codec
// ABOUTME: Everything here operates on raw bytes; it has no notion of bind state or sessions

use crate::error::CodecError;
use crate::pdu::{CommandId, CommandStatus};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;

/// Maximum PDU size allowed on the wire, per SMPP v3.4 §3.1.
pub const MAX_PDU_SIZE: u32 = 65_536;

/// Fixed size of the PDU header: four 32-bit fields.
pub const HEADER_SIZE: usize = 16;

fn remaining(cur: &Cursor<&[u8]>) -> usize {
    (cur.get_ref().len() as u64 - cur.position()) as usize
}

#[tracing::instrument(level = "trace", skip(cur))]
pub fn decode_u8(cur: &mut Cursor<&[u8]>, field: &'static str) -> Result<u8, CodecError> {
    if remaining(cur) < 1 {
        tracing::warn!(field, "truncated body reading u8");
        return Err(CodecError::TruncatedBody { field });
    }
    Ok(cur.get_u8())
}

#[tracing::instrument(level = "trace", skip(cur))]
pub fn decode_u16(cur: &mut Cursor<&[u8]>, field: &'static str) -> Result<u16, CodecError> {
    if remaining(cur) < 2 {
        tracing::warn!(field, "truncated body reading u16");
        return Err(CodecError::TruncatedBody { field });
    }
    Ok(cur.get_u16())
}

#[tracing::instrument(level = "trace", skip(cur))]
pub fn decode_u32(cur: &mut Cursor<&[u8]>, field: &'static str) -> Result<u32, CodecError> {
    if remaining(cur) < 4 {
        tracing::warn!(field, "truncated body reading u32");
        return Err(CodecError::TruncatedBody { field });
    }
    Ok(cur.get_u32())
}

/// Reads a null-terminated C-Octet String, returning the bytes preceding the
/// terminator. `max` includes the terminator itself (SMPP field widths are
/// quoted inclusive of the trailing NUL).
#[tracing::instrument(level = "trace", skip(cur))]
pub fn decode_cstring(
    cur: &mut Cursor<&[u8]>,
    max: usize,
    field: &'static str,
) -> Result<String, CodecError> {
    let start = cur.position() as usize;
    let bytes = cur.get_ref();
    let mut end = start;
    while end < bytes.len() && end - start < max {
        if bytes[end] == 0 {
            let value = &bytes[start..end];
            cur.set_position((end + 1) as u64);
            return String::from_utf8(value.to_vec()).map_err(|_| {
                tracing::warn!(field, "invalid utf-8 in c-octet string");
                CodecError::Utf8Error { field }
            });
        }
        end += 1;
    }
    if end >= bytes.len() {
        tracing::warn!(field, "truncated body reading c-octet string");
        return Err(CodecError::TruncatedBody { field });
    }
    tracing::warn!(field, max, "c-octet string missing terminator within max width");
    Err(CodecError::MissingTerminator { max })
}

/// Reads a raw octet string of exactly `len` bytes.
#[tracing::instrument(level = "trace", skip(cur))]
pub fn decode_octets(
    cur: &mut Cursor<&[u8]>,
    len: usize,
    field: &'static str,
) -> Result<Bytes, CodecError> {
    if remaining(cur) < len {
        tracing::warn!(field, len, "truncated body reading octet string");
        return Err(CodecError::TruncatedBody { field });
    }
    let mut buf = vec![0u8; len];
    cur.copy_to_slice(&mut buf);
    Ok(Bytes::from(buf))
}

pub fn encode_u8(buf: &mut BytesMut, value: u8) {
    buf.put_u8(value);
}

pub fn encode_u16(buf: &mut BytesMut, value: u16) {
    buf.put_u16(value);
}

pub fn encode_u32(buf: &mut BytesMut, value: u32) {
    buf.put_u32(value);
}

/// Encodes a C-Octet String: the ASCII bytes of `value` followed by a NUL.
/// An empty string encodes as the single byte `0x00`.
pub fn encode_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}

pub fn encode_octets(buf: &mut BytesMut, value: &[u8]) {
    buf.put_slice(value);
}

/// A decoded PDU header: the four fixed 32-bit fields common to every SMPP
/// command. `command_length` is recomputed at encode time from the body that
/// accompanies it, never trusted verbatim from a caller-constructed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    /// Raw command ID as it appeared on the wire. Not every value maps to a
    /// known `CommandId` — unrecognized commands are still framed and handed
    /// to the session engine, which logs and GENERIC_NACKs them (spec §6).
    pub command_id_raw: u32,
    pub command_status: CommandStatus,
    pub sequence_number: u32,
}

impl PduHeader {
    /// The typed command ID, if this is one the core recognizes.
    pub fn command_id(&self) -> Option<CommandId> {
        CommandId::try_from(self.command_id_raw).ok()
    }
}

impl PduHeader {
    pub const SIZE: usize = HEADER_SIZE;

    #[tracing::instrument(level = "trace", skip(cur))]
    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if remaining(cur) < HEADER_SIZE {
            let len = remaining(cur);
            tracing::warn!(len, "pdu header shorter than 16 bytes");
            return Err(CodecError::HeaderTooShort { len });
        }
        let command_length = decode_u32(cur, "command_length")?;
        let raw_id = decode_u32(cur, "command_id")?;
        let raw_status = decode_u32(cur, "command_status")?;
        let sequence_number = decode_u32(cur, "sequence_number")?;

        if !(HEADER_SIZE as u32..=MAX_PDU_SIZE).contains(&command_length) {
            tracing::warn!(
                command_length,
                min = HEADER_SIZE,
                max = MAX_PDU_SIZE,
                "pdu command_length out of bounds"
            );
            return Err(CodecError::InvalidPduLength {
                length: command_length,
                min: HEADER_SIZE as u32,
                max: MAX_PDU_SIZE,
            });
        }

        let command_status = CommandStatus::from(raw_status);

        Ok(PduHeader {
            command_length,
            command_id_raw: raw_id,
            command_status,
            sequence_number,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        encode_u32(buf, self.command_length);
        encode_u32(buf, self.command_id_raw);
        encode_u32(buf, self.command_status.into());
        encode_u32(buf, self.sequence_number);
    }

    pub fn for_command(command_id: CommandId, command_status: CommandStatus, sequence_number: u32) -> Self {
        PduHeader {
            command_length: 0,
            command_id_raw: command_id.into(),
            command_status,
            sequence_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parse_s1() {
        let bytes: [u8; 16] = [
            0x00, 0x00, 0x00, 0x10, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x01,
        ];
        let mut cur = Cursor::new(&bytes[..]);
        let header = PduHeader::decode(&mut cur).unwrap();
        assert_eq!(header.command_length, 16);
        assert_eq!(header.command_id(), Some(CommandId::BindTransmitterResp));
        assert_eq!(header.command_status, CommandStatus::OK);
        assert_eq!(header.sequence_number, 1);
    }

    #[test]
    fn truncated_header_s2() {
        let bytes = [0u8; 15];
        let mut cur = Cursor::new(&bytes[..]);
        let err = PduHeader::decode(&mut cur).unwrap_err();
        assert!(matches!(err, CodecError::HeaderTooShort { len: 15 }));
    }

    #[test]
    fn header_roundtrip() {
        let header = PduHeader {
            command_length: 16,
            command_id_raw: CommandId::EnquireLink.into(),
            command_status: CommandStatus::OK,
            sequence_number: 7,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = PduHeader::decode(&mut cur).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn cstring_empty_is_single_nul() {
        let mut buf = BytesMut::new();
        encode_cstring(&mut buf, "");
        assert_eq!(&buf[..], &[0u8]);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = decode_cstring(&mut cur, 16, "test").unwrap();
        assert_eq!(decoded, "");
    }

    #[test]
    fn cstring_missing_terminator() {
        let buf = vec![b'a'; 16];
        let mut cur = Cursor::new(&buf[..]);
        let err = decode_cstring(&mut cur, 16, "test").unwrap_err();
        assert!(matches!(err, CodecError::MissingTerminator { max: 16 }));
    }
}
