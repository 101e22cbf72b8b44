// ABOUTME: SMPP Type-Of-Number (TON) and Numbering-Plan-Indicator (NPI) address qualifiers

use num_enum::TryFromPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum TypeOfNumber {
    Unknown = 0x00,
    International = 0x01,
    National = 0x02,
    NetworkSpecific = 0x03,
    SubscriberNumber = 0x04,
    Alphanumeric = 0x05,
    Abbreviated = 0x06,
}

impl Default for TypeOfNumber {
    fn default() -> Self {
        TypeOfNumber::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum NumericPlanIndicator {
    Unknown = 0x00,
    Isdn = 0x01,
    Data = 0x03,
    Telex = 0x04,
    LandMobile = 0x06,
    National = 0x08,
    Private = 0x09,
    Ermes = 0x0A,
    Internet = 0x0E,
    WapClientId = 0x12,
}

impl Default for NumericPlanIndicator {
    fn default() -> Self {
        NumericPlanIndicator::Unknown
    }
}
