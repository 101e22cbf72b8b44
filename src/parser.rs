// ABOUTME: Interprets a decoded deliver_sm body as a plain SMS or a delivery receipt (spec §4.D)
// ABOUTME: parse_header/parse_bind_resp/parse_submit_resp/parse_query_resp live in codec.rs/pdu/*
// ABOUTME: as the typed decode() methods on PduHeader/BindResponse/SubmitSmResponse/QuerySmResponse

use crate::pdu::{esm_class, DeliverSm};
use crate::sms::{DeliveryReceipt, ParsedMessage, ReceiptFields, Sms};

/// The fixed, ordered key list a receipt body is parsed against. The parser
/// is positional against this list rather than free-form, to tolerate SMSC
/// whitespace quirks (spec §4.D).
const RECEIPT_KEYS: &[&str] = &[
    "id", "sub", "dlvrd", "submit date", "done date", "stat", "err", "text",
];

/// Turns a decoded `deliver_sm` body into a plain `Sms` or, when the receipt
/// bit is set in `esm_class`, a `DeliveryReceipt` (spec invariant #5).
pub fn parse_sms(body: DeliverSm) -> ParsedMessage {
    let is_receipt = esm_class::is_receipt(body.esm_class);
    let sms = Sms {
        service_type: body.service_type,
        source_addr: body.source_addr,
        dest_addr: body.dest_addr,
        esm_class: body.esm_class,
        protocol_id: body.protocol_id,
        priority: body.priority_flag,
        schedule_delivery_time: body.schedule_delivery_time,
        validity_period: body.validity_period,
        registered_delivery: body.registered_delivery,
        replace_if_present: body.replace_if_present_flag,
        data_coding: body.data_coding,
        default_msg_id: body.sm_default_msg_id,
        short_message: body.short_message.clone(),
        tlvs: body.tlvs,
    };

    if !is_receipt {
        return ParsedMessage::Sms(sms);
    }

    let text = String::from_utf8_lossy(&body.short_message).into_owned();
    let fields = parse_receipt_fields(&text).unwrap_or_else(|| {
        tracing::warn!(
            text = %text,
            "deliver_sm has the receipt bit set but its text doesn't match the known field layout; yielding a receipt with best-effort fields"
        );
        ReceiptFields::default()
    });
    ParsedMessage::Receipt(DeliveryReceipt { sms, fields })
}

/// Extracts the positional `key:value` fields from a receipt's text body.
/// Each key in `RECEIPT_KEYS` is located in turn and its value runs up to
/// (but not including) the next known key, tolerating the inconsistent
/// whitespace real SMSCs emit around the `:` separator. Returns `None` if no
/// key at all could be located, in which case the caller falls back to an
/// all-empty `ReceiptFields` rather than downgrading away from a receipt
/// (spec invariant #5 is unconditional on the esm_class bit).
fn parse_receipt_fields(text: &str) -> Option<ReceiptFields> {
    let mut values = vec![String::new(); RECEIPT_KEYS.len()];
    let mut any_found = false;

    for (i, key) in RECEIPT_KEYS.iter().enumerate() {
        let marker = format!("{key}:");
        let Some(start) = text.find(&marker).map(|pos| pos + marker.len()) else {
            continue;
        };
        any_found = true;
        let rest = &text[start..];

        let end = RECEIPT_KEYS[i + 1..]
            .iter()
            .filter_map(|next_key| rest.find(&format!("{next_key}:")))
            .min()
            .unwrap_or(rest.len());

        values[i] = rest[..end].trim().to_string();
    }

    if !any_found {
        return None;
    }

    Some(ReceiptFields {
        id: values[0].clone(),
        sub: values[1].clone(),
        dlvrd: values[2].clone(),
        submit_date: values[3].clone(),
        done_date: values[4].clone(),
        stat: values[5].clone(),
        err: values[6].clone(),
        text: values[7].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{Address, NumericPlanIndicator, TypeOfNumber};
    use bytes::Bytes;

    fn deliver(esm_class: u8, short_message: &str) -> DeliverSm {
        DeliverSm {
            service_type: String::new(),
            source_addr: Address::unknown("SMSC").unwrap(),
            dest_addr: Address::new(
                "1234",
                TypeOfNumber::International,
                NumericPlanIndicator::Isdn,
            )
            .unwrap(),
            esm_class,
            protocol_id: 0,
            priority_flag: 0,
            schedule_delivery_time: String::new(),
            validity_period: String::new(),
            registered_delivery: 0,
            replace_if_present_flag: 0,
            data_coding: 0,
            sm_default_msg_id: 0,
            short_message: Bytes::from(short_message.to_string()),
            tlvs: vec![],
        }
    }

    #[test]
    fn plain_message_is_sms() {
        let parsed = parse_sms(deliver(0, "Hello"));
        assert!(matches!(parsed, ParsedMessage::Sms(_)));
    }

    #[test]
    fn receipt_bit_yields_delivery_receipt_s7() {
        let body = deliver(
            0x04,
            "id:msg123 sub:001 dlvrd:001 submit date:2601221200 done date:2601221201 stat:DELIVRD err:000 text:Test",
        );
        let parsed = parse_sms(body);
        match parsed {
            ParsedMessage::Receipt(receipt) => {
                assert_eq!(receipt.fields.id, "msg123");
                assert_eq!(receipt.fields.stat, "DELIVRD");
                assert_eq!(receipt.fields.submit_date, "2601221200");
                assert_eq!(receipt.fields.done_date, "2601221201");
                assert_eq!(receipt.fields.text, "Test");
            }
            ParsedMessage::Sms(_) => panic!("expected a delivery receipt"),
        }
    }

    #[test]
    fn receipt_bit_with_unparseable_text_still_yields_receipt() {
        let parsed = parse_sms(deliver(0x04, "this SMSC truncated the receipt text"));
        match parsed {
            ParsedMessage::Receipt(receipt) => {
                assert_eq!(receipt.fields, ReceiptFields::default());
            }
            ParsedMessage::Sms(_) => panic!("receipt bit must always yield a DeliveryReceipt"),
        }
    }

    #[test]
    fn receipt_bit_with_partial_fields_fills_missing_with_empty() {
        let parsed = parse_sms(deliver(0x04, "id:msg001 stat:DELIVRD"));
        match parsed {
            ParsedMessage::Receipt(receipt) => {
                assert_eq!(receipt.fields.id, "msg001");
                assert_eq!(receipt.fields.stat, "DELIVRD");
                assert_eq!(receipt.fields.sub, "");
                assert_eq!(receipt.fields.text, "");
            }
            ParsedMessage::Sms(_) => panic!("expected a delivery receipt"),
        }
    }
}
