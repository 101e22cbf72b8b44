// ABOUTME: SMPP data_coding field — identifies the character encoding of short_message

/// The `data_coding` byte. Only the codings this core's segmenter and façade
/// actually branch on are named; everything else round-trips as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCoding {
    /// SMSC default alphabet (GSM 03.38), treated as opaque bytes by this core.
    Default,
    /// ISO-8859-1.
    Latin1,
    /// Raw 8-bit binary.
    Binary,
    /// UCS-2 / UTF-16BE.
    Ucs2,
    Other(u8),
}

impl DataCoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => DataCoding::Default,
            0x03 => DataCoding::Latin1,
            0x04 => DataCoding::Binary,
            0x08 => DataCoding::Ucs2,
            other => DataCoding::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            DataCoding::Default => 0x00,
            DataCoding::Latin1 => 0x03,
            DataCoding::Binary => 0x04,
            DataCoding::Ucs2 => 0x08,
            DataCoding::Other(b) => b,
        }
    }
}

impl Default for DataCoding {
    fn default() -> Self {
        DataCoding::Default
    }
}
