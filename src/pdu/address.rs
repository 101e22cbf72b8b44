// ABOUTME: SMPP addresses — a (value, ton, npi) triple with the length invariants §3 requires
// ABOUTME: Grounded on the teacher's per-TON const-generic address types, unified into one struct

use super::{NumericPlanIndicator, TypeOfNumber};
use crate::codec::{decode_cstring, decode_u8, encode_cstring, encode_u8};
use crate::error::{CodecError, SmppError};
use bytes::BytesMut;
use std::io::Cursor;

const MAX_ALPHANUMERIC_LEN: usize = 11;
const MAX_PHONE_LEN: usize = 20;
/// Field width including the terminating NUL, as used for C-Octet String
/// address fields throughout the PDU bodies.
const ADDRESS_FIELD_WIDTH: usize = 21;

/// An SMSC or ESME address: a value qualified by type-of-number and
/// numbering-plan-indicator. `len(value) <= 11` when `ton == Alphanumeric`;
/// otherwise `len(value) <= 20` (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub value: String,
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
}

impl Address {
    pub fn new(
        value: impl Into<String>,
        ton: TypeOfNumber,
        npi: NumericPlanIndicator,
    ) -> Result<Self, SmppError> {
        let value = value.into();
        let max = if ton == TypeOfNumber::Alphanumeric {
            MAX_ALPHANUMERIC_LEN
        } else {
            MAX_PHONE_LEN
        };
        if value.len() > max {
            return Err(SmppError::InvalidAddress(format!(
                "address value {:?} exceeds max length {} for ton {:?}",
                value, max, ton
            )));
        }
        Ok(Address { value, ton, npi })
    }

    pub fn unknown(value: impl Into<String>) -> Result<Self, SmppError> {
        Self::new(value, TypeOfNumber::Unknown, NumericPlanIndicator::Unknown)
    }

    pub(crate) fn decode(cur: &mut Cursor<&[u8]>, prefix: &'static str) -> Result<Self, CodecError> {
        let raw_ton = decode_u8(cur, "addr_ton")?;
        let raw_npi = decode_u8(cur, "addr_npi")?;
        let value = decode_cstring(cur, ADDRESS_FIELD_WIDTH, prefix)?;
        let ton = TypeOfNumber::try_from(raw_ton).unwrap_or(TypeOfNumber::Unknown);
        let npi = NumericPlanIndicator::try_from(raw_npi).unwrap_or(NumericPlanIndicator::Unknown);
        Ok(Address { value, ton, npi })
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        encode_u8(buf, self.ton as u8);
        encode_u8(buf, self.npi as u8);
        encode_cstring(buf, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanumeric_over_11_is_rejected() {
        let err = Address::new(
            "TWELVECHARS!",
            TypeOfNumber::Alphanumeric,
            NumericPlanIndicator::Unknown,
        )
        .unwrap_err();
        assert!(matches!(err, SmppError::InvalidAddress(_)));
    }

    #[test]
    fn phone_number_roundtrip() {
        let addr = Address::new(
            "1234",
            TypeOfNumber::International,
            NumericPlanIndicator::Isdn,
        )
        .unwrap();
        let mut buf = BytesMut::new();
        addr.encode(&mut buf);
        let mut cur = Cursor::new(&buf[..]);
        let decoded = Address::decode(&mut cur, "addr").unwrap();
        assert_eq!(decoded, addr);
    }
}
