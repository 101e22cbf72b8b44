// ABOUTME: esm_class bit flags consulted by the parser (receipt bit) and segmenter (UDHI bit)

/// Set when the body carries a SMSC delivery receipt rather than a plain
/// mobile-originated message.
pub const RECEIPT_BIT: u8 = 0x04;

/// Set when `short_message` is prefixed with a User Data Header (UDH),
/// per the UDH_8BIT concatenation method.
pub const UDHI_BIT: u8 = 0x40;

pub fn is_receipt(esm_class: u8) -> bool {
    esm_class & RECEIPT_BIT != 0
}

pub fn has_udhi(esm_class: u8) -> bool {
    esm_class & UDHI_BIT != 0
}
