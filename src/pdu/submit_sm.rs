// ABOUTME: submit_sm request/response bodies — the PDU the façade and segmenter drive outbound
// ABOUTME: Field order mirrors spec §4.D's parse_sms positional layout, which submit_sm shares

use super::address::Address;
use super::tlv::Tlv;
use crate::codec::{decode_cstring, decode_octets, decode_u8, encode_cstring, encode_octets, encode_u8};
use crate::error::CodecError;
use bytes::{Bytes, BytesMut};
use std::io::Cursor;

const SERVICE_TYPE_WIDTH: usize = 6;
const SCHEDULE_WIDTH: usize = 17;
const VALIDITY_WIDTH: usize = 17;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSm {
    pub service_type: String,
    pub source_addr: Address,
    pub dest_addr: Address,
    pub esm_class: u8,
    pub protocol_id: u8,
    pub priority_flag: u8,
    pub schedule_delivery_time: String,
    pub validity_period: String,
    pub registered_delivery: u8,
    pub replace_if_present_flag: u8,
    pub data_coding: u8,
    pub sm_default_msg_id: u8,
    pub short_message: Bytes,
    pub tlvs: Vec<Tlv>,
}

impl SubmitSm {
    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.service_type);
        self.source_addr.encode(buf);
        self.dest_addr.encode(buf);
        encode_u8(buf, self.esm_class);
        encode_u8(buf, self.protocol_id);
        encode_u8(buf, self.priority_flag);
        encode_cstring(buf, &self.schedule_delivery_time);
        encode_cstring(buf, &self.validity_period);
        encode_u8(buf, self.registered_delivery);
        encode_u8(buf, self.replace_if_present_flag);
        encode_u8(buf, self.data_coding);
        encode_u8(buf, self.sm_default_msg_id);
        encode_u8(buf, self.short_message.len() as u8);
        encode_octets(buf, &self.short_message);
        for tlv in &self.tlvs {
            tlv.encode(buf);
        }
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let service_type = decode_cstring(cur, SERVICE_TYPE_WIDTH, "service_type")?;
        let source_addr = Address::decode(cur, "source_addr")?;
        let dest_addr = Address::decode(cur, "destination_addr")?;
        let esm_class = decode_u8(cur, "esm_class")?;
        let protocol_id = decode_u8(cur, "protocol_id")?;
        let priority_flag = decode_u8(cur, "priority_flag")?;
        let schedule_delivery_time = decode_cstring(cur, SCHEDULE_WIDTH, "schedule_delivery_time")?;
        let validity_period = decode_cstring(cur, VALIDITY_WIDTH, "validity_period")?;
        let registered_delivery = decode_u8(cur, "registered_delivery")?;
        let replace_if_present_flag = decode_u8(cur, "replace_if_present_flag")?;
        let data_coding = decode_u8(cur, "data_coding")?;
        let sm_default_msg_id = decode_u8(cur, "sm_default_msg_id")?;
        let sm_length = decode_u8(cur, "sm_length")? as usize;
        let short_message = decode_octets(cur, sm_length, "short_message")?;
        let tlvs = Tlv::decode_all(cur)?;
        Ok(SubmitSm {
            service_type,
            source_addr,
            dest_addr,
            esm_class,
            protocol_id,
            priority_flag,
            schedule_delivery_time,
            validity_period,
            registered_delivery,
            replace_if_present_flag,
            data_coding,
            sm_default_msg_id,
            short_message,
            tlvs,
        })
    }
}

/// `submit_sm_resp` body: just the SMSC-assigned message ID (spec §4.D
/// parse_submit_resp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSmResponse {
    pub message_id: String,
}

impl SubmitSmResponse {
    pub fn encode(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
    }

    pub fn decode(cur: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let message_id = decode_cstring(cur, 65, "message_id")?;
        Ok(SubmitSmResponse { message_id })
    }
}
