// ABOUTME: Parsed deliver_sm output — a plain SMS or, when the receipt bit is set, a DeliveryReceipt
// ABOUTME: Expressed as a tagged variant rather than an inheritance chain, per spec §9 design notes

use crate::pdu::{Address, Tlv};
use bytes::Bytes;

/// A parsed `deliver_sm` body (spec §3/§4.D).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sms {
    pub service_type: String,
    pub source_addr: Address,
    pub dest_addr: Address,
    pub esm_class: u8,
    pub protocol_id: u8,
    pub priority: u8,
    pub schedule_delivery_time: String,
    pub validity_period: String,
    pub registered_delivery: u8,
    pub replace_if_present: u8,
    pub data_coding: u8,
    pub default_msg_id: u8,
    pub short_message: Bytes,
    pub tlvs: Vec<Tlv>,
}

/// The SMSC delivery status reported in a `DeliveryReceipt` (spec §3 `stat` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptStatus {
    Delivered,
    Expired,
    Deleted,
    Undelivered,
    Accepted,
    Unknown,
    Rejected,
    Other,
}

impl ReceiptStatus {
    pub fn parse(token: &str) -> Self {
        match token {
            "DELIVRD" => ReceiptStatus::Delivered,
            "EXPIRED" => ReceiptStatus::Expired,
            "DELETED" => ReceiptStatus::Deleted,
            "UNDELIV" => ReceiptStatus::Undelivered,
            "ACCEPTD" => ReceiptStatus::Accepted,
            "UNKNOWN" => ReceiptStatus::Unknown,
            "REJECTD" => ReceiptStatus::Rejected,
            _ => ReceiptStatus::Other,
        }
    }
}

/// The textual fields extracted from a receipt's `short_message` body
/// (spec §4.D: positional against the fixed key list
/// `id sub dlvrd submit date done date stat err text`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptFields {
    pub id: String,
    pub sub: String,
    pub dlvrd: String,
    pub submit_date: String,
    pub done_date: String,
    pub stat: String,
    pub err: String,
    pub text: String,
}

/// A `deliver_sm` whose `esm_class & 0x04 != 0`: carries the SMS fields plus
/// the parsed receipt record (spec §3, §9 design notes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub sms: Sms,
    pub fields: ReceiptFields,
}

impl DeliveryReceipt {
    pub fn status(&self) -> ReceiptStatus {
        ReceiptStatus::parse(&self.fields.stat)
    }
}

/// The result of `parse_sms`: either a plain mobile-originated message or a
/// delivery receipt, distinguished purely by the `esm_class` receipt bit
/// (spec invariant #5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Sms(Sms),
    Receipt(DeliveryReceipt),
}

impl ParsedMessage {
    pub fn sms(&self) -> &Sms {
        match self {
            ParsedMessage::Sms(sms) => sms,
            ParsedMessage::Receipt(receipt) => &receipt.sms,
        }
    }
}
