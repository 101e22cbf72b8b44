// ABOUTME: PDU framing: reads one complete PDU from a byte stream, decodes its body by command,
// ABOUTME: and serializes a typed Frame back to bytes. The framer does not interpret bodies itself.

use crate::codec::{PduHeader, HEADER_SIZE, MAX_PDU_SIZE};
use crate::error::CodecError;
use crate::pdu::{
    BindRequest, BindResponse, CommandId, CommandStatus, DeliverSm, DeliverSmResponse, QuerySm,
    QuerySmResponse, SubmitSm, SubmitSmResponse,
};
use bytes::{Bytes, BytesMut};
use std::io::Cursor;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// A fully decoded PDU: header plus the typed body for every command this
/// core recognizes. `Unknown` carries the raw body for anything outside that
/// set (spec §6: unknown command IDs are still framed, just not interpreted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    BindTransmitter(PduHeader, BindRequest),
    BindTransmitterResp(PduHeader, BindResponse),
    BindReceiver(PduHeader, BindRequest),
    BindReceiverResp(PduHeader, BindResponse),
    BindTransceiver(PduHeader, BindRequest),
    BindTransceiverResp(PduHeader, BindResponse),
    Unbind(PduHeader),
    UnbindResp(PduHeader),
    SubmitSm(PduHeader, Box<SubmitSm>),
    SubmitSmResp(PduHeader, SubmitSmResponse),
    DeliverSm(PduHeader, Box<DeliverSm>),
    DeliverSmResp(PduHeader, DeliverSmResponse),
    QuerySm(PduHeader, QuerySm),
    QuerySmResp(PduHeader, QuerySmResponse),
    EnquireLink(PduHeader),
    EnquireLinkResp(PduHeader),
    GenericNack(PduHeader),
    Unknown(PduHeader, Bytes),
}

impl Frame {
    pub fn header(&self) -> &PduHeader {
        match self {
            Frame::BindTransmitter(h, _)
            | Frame::BindTransmitterResp(h, _)
            | Frame::BindReceiver(h, _)
            | Frame::BindReceiverResp(h, _)
            | Frame::BindTransceiver(h, _)
            | Frame::BindTransceiverResp(h, _)
            | Frame::Unbind(h)
            | Frame::UnbindResp(h)
            | Frame::SubmitSm(h, _)
            | Frame::SubmitSmResp(h, _)
            | Frame::DeliverSm(h, _)
            | Frame::DeliverSmResp(h, _)
            | Frame::QuerySm(h, _)
            | Frame::QuerySmResp(h, _)
            | Frame::EnquireLink(h)
            | Frame::EnquireLinkResp(h)
            | Frame::GenericNack(h)
            | Frame::Unknown(h, _) => h,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.header().sequence_number
    }

    pub fn command_status(&self) -> CommandStatus {
        self.header().command_status
    }

    /// Decodes a complete PDU (header already validated) from its body bytes.
    /// Unrecognized `command_id`s decode as `Unknown` rather than erroring —
    /// the session engine decides what to do with them (spec §6).
    #[tracing::instrument(level = "trace", skip(body))]
    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self, CodecError> {
        let mut cur = Cursor::new(body);
        let frame = match header.command_id() {
            Some(CommandId::BindTransmitter) => {
                Frame::BindTransmitter(header, BindRequest::decode(&mut cur)?)
            }
            Some(CommandId::BindTransmitterResp) => {
                Frame::BindTransmitterResp(header, BindResponse::decode(&mut cur)?)
            }
            Some(CommandId::BindReceiver) => {
                Frame::BindReceiver(header, BindRequest::decode(&mut cur)?)
            }
            Some(CommandId::BindReceiverResp) => {
                Frame::BindReceiverResp(header, BindResponse::decode(&mut cur)?)
            }
            Some(CommandId::BindTransceiver) => {
                Frame::BindTransceiver(header, BindRequest::decode(&mut cur)?)
            }
            Some(CommandId::BindTransceiverResp) => {
                Frame::BindTransceiverResp(header, BindResponse::decode(&mut cur)?)
            }
            Some(CommandId::Unbind) => Frame::Unbind(header),
            Some(CommandId::UnbindResp) => Frame::UnbindResp(header),
            Some(CommandId::SubmitSm) => {
                Frame::SubmitSm(header, Box::new(SubmitSm::decode(&mut cur)?))
            }
            Some(CommandId::SubmitSmResp) => {
                Frame::SubmitSmResp(header, SubmitSmResponse::decode(&mut cur)?)
            }
            Some(CommandId::DeliverSm) => {
                Frame::DeliverSm(header, Box::new(DeliverSm::decode(&mut cur)?))
            }
            Some(CommandId::DeliverSmResp) => {
                Frame::DeliverSmResp(header, DeliverSmResponse::decode(&mut cur)?)
            }
            Some(CommandId::QuerySm) => Frame::QuerySm(header, QuerySm::decode(&mut cur)?),
            Some(CommandId::QuerySmResp) => {
                Frame::QuerySmResp(header, QuerySmResponse::decode(&mut cur)?)
            }
            Some(CommandId::EnquireLink) => Frame::EnquireLink(header),
            Some(CommandId::EnquireLinkResp) => Frame::EnquireLinkResp(header),
            Some(CommandId::GenericNack) => Frame::GenericNack(header),
            None => {
                tracing::warn!(
                    command_id = %format!("{:#x}", header.command_id_raw),
                    "unrecognized command_id; framing as opaque Unknown"
                );
                Frame::Unknown(header, Bytes::copy_from_slice(body))
            }
        };
        Ok(frame)
    }

    /// Serializes this frame to a complete PDU, recomputing `command_length`
    /// from the encoded body length (spec invariant #2: header coherence).
    pub fn encode(&self) -> BytesMut {
        let mut body = BytesMut::new();
        match self {
            Frame::BindTransmitter(_, b)
            | Frame::BindReceiver(_, b)
            | Frame::BindTransceiver(_, b) => b.encode(&mut body),
            Frame::BindTransmitterResp(_, b)
            | Frame::BindReceiverResp(_, b)
            | Frame::BindTransceiverResp(_, b) => b.encode(&mut body),
            Frame::SubmitSm(_, b) => b.encode(&mut body),
            Frame::SubmitSmResp(_, b) => b.encode(&mut body),
            Frame::DeliverSm(_, b) => b.encode(&mut body),
            Frame::DeliverSmResp(_, b) => b.encode(&mut body),
            Frame::QuerySm(_, b) => b.encode(&mut body),
            Frame::QuerySmResp(_, b) => b.encode(&mut body),
            Frame::Unknown(_, b) => body.extend_from_slice(b),
            Frame::Unbind(_)
            | Frame::UnbindResp(_)
            | Frame::EnquireLink(_)
            | Frame::EnquireLinkResp(_)
            | Frame::GenericNack(_) => {}
        }

        let mut header = *self.header();
        header.command_length = (HEADER_SIZE + body.len()) as u32;

        let mut out = BytesMut::with_capacity(header.command_length as usize);
        header.encode(&mut out);
        out.extend_from_slice(&body);
        out
    }
}

/// Reads exactly one framed PDU from an async byte stream: 16 header bytes,
/// then `command_length - 16` body bytes (spec §4.B). Returns `Ok(None)` on a
/// clean EOF before any bytes are read.
pub async fn read_frame<R: AsyncRead + Unpin>(stream: &mut R) -> Result<Option<Frame>, CodecError> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    match stream.read_exact(&mut header_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(CodecError::Io(e)),
    }

    let mut cur = Cursor::new(&header_bytes[..]);
    let header = PduHeader::decode(&mut cur)?;

    let body_len = header.command_length as usize - HEADER_SIZE;
    let mut body = vec![0u8; body_len];
    stream.read_exact(&mut body).await.map_err(CodecError::Io)?;

    let frame = Frame::decode(header, &body)?;
    tracing::trace!(
        command_id = %format!("{:#x}", header.command_id_raw),
        sequence_number = header.sequence_number,
        "read frame"
    );
    Ok(Some(frame))
}

/// Writes one framed PDU to an async byte stream as a single logical write
/// (spec §5: PDUs are written atomically, one per write call).
pub async fn write_frame<W: AsyncWrite + Unpin>(
    stream: &mut W,
    frame: &Frame,
) -> Result<(), CodecError> {
    tracing::trace!(
        command_id = %format!("{:#x}", frame.header().command_id_raw),
        sequence_number = frame.sequence_number(),
        "write frame"
    );
    let bytes = frame.encode();
    stream.write_all(&bytes).await.map_err(CodecError::Io)?;
    stream.flush().await.map_err(CodecError::Io)?;
    Ok(())
}

#[allow(dead_code)]
const _MAX_PDU_CHECK: u32 = MAX_PDU_SIZE;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{NumericPlanIndicator, TypeOfNumber};
    use tokio::io::duplex;

    #[tokio::test]
    async fn enquire_link_roundtrip_over_duplex() {
        let (mut a, mut b) = duplex(1024);
        let header = PduHeader::for_command(CommandId::EnquireLink, CommandStatus::OK, 7);
        let frame = Frame::EnquireLink(header);
        write_frame(&mut a, &frame).await.unwrap();
        let decoded = read_frame(&mut b).await.unwrap().unwrap();
        assert_eq!(decoded.sequence_number(), 7);
        assert!(matches!(decoded, Frame::EnquireLink(_)));
    }

    #[tokio::test]
    async fn eof_before_any_bytes_is_none() {
        let (a, mut b) = duplex(1024);
        drop(a);
        let result = read_frame(&mut b).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn submit_sm_frame_encode_header_coherence() {
        let header = PduHeader::for_command(CommandId::SubmitSm, CommandStatus::OK, 1);
        let body = SubmitSm {
            service_type: String::new(),
            source_addr: crate::pdu::Address::new(
                "1234",
                TypeOfNumber::International,
                NumericPlanIndicator::Isdn,
            )
            .unwrap(),
            dest_addr: crate::pdu::Address::new(
                "5678",
                TypeOfNumber::International,
                NumericPlanIndicator::Isdn,
            )
            .unwrap(),
            esm_class: 0,
            protocol_id: 0,
            priority_flag: 0,
            schedule_delivery_time: String::new(),
            validity_period: String::new(),
            registered_delivery: 0,
            replace_if_present_flag: 0,
            data_coding: 0,
            sm_default_msg_id: 0,
            short_message: Bytes::from_static(b"Hello World"),
            tlvs: vec![],
        };
        let frame = Frame::SubmitSm(header, Box::new(body));
        let encoded = frame.encode();
        let length = u32::from_be_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]);
        assert_eq!(length as usize, encoded.len());
    }
}
