// ABOUTME: Public façade — bind*, send_sms, read_sms, query_status, enquire_link, close (spec §4.G)
// ABOUTME: Owns a Session and a Segmenter; translates façade-level calls into PDU exchanges

use crate::codec::PduHeader;
use crate::config::ClientConfig;
use crate::error::{SmppError, SmppResult};
use crate::frame::Frame;
use crate::parser;
use crate::pdu::{
    Address, BindMode, BindRequest, CommandId, CommandStatus, DataCoding, QuerySm, QuerySmResponse,
    SubmitSm, Tlv,
};
use crate::segmenter::Segmenter;
use crate::session::{Session, SessionState};
use crate::sms::ParsedMessage;
use crate::transport::{connect_tcp, Transport};
use tokio::net::{TcpStream, ToSocketAddrs};

/// The optional, rarely-set `send_sms` parameters (spec §4.G
/// `tags?`/`schedule?`/`validity?`): extra TLVs to attach to every segment,
/// a scheduled delivery time, and a validity period. All default to empty,
/// matching the spec's defaulted call signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendSmsOptions {
    pub tags: Vec<Tlv>,
    pub schedule_delivery_time: String,
    pub validity_period: String,
}

/// The result of a successful `query_status` call (spec §4.D parse_query_resp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub message_id: String,
    pub final_date: String,
    pub message_state: u8,
    pub error_code: u8,
}

/// The SMPP client façade. Generic over its transport so tests can drive it
/// against an in-memory duplex stream; `Client::connect` is the TCP entry
/// point real applications use.
pub struct Client<T: Transport + 'static> {
    session: Session<T>,
    config: ClientConfig,
    segmenter: Segmenter,
}

impl Client<TcpStream> {
    /// Opens a TCP connection and wraps it in a session (spec §6 `open()`).
    /// Does not bind — call one of `bind_transmitter`/`bind_receiver`/
    /// `bind_transceiver` afterward.
    pub async fn connect<A: ToSocketAddrs>(addr: A, config: ClientConfig) -> SmppResult<Self> {
        let connect_timeout = config.connect_timeout;
        let stream = connect_tcp(addr, connect_timeout).await?;
        Ok(Client::from_transport(stream, config))
    }
}

impl<T: Transport + 'static> Client<T> {
    /// Wraps an already-established transport in a session. Used directly by
    /// tests against `tokio::io::duplex`; `Client::connect` is the TCP path.
    pub fn from_transport(transport: T, config: ClientConfig) -> Self {
        let read_timeout = config.read_timeout;
        Client {
            session: Session::new(transport, read_timeout),
            segmenter: Segmenter::new(1),
            config,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.session.state().await
    }

    pub async fn bind_transmitter(&mut self, system_id: &str, password: &str) -> SmppResult<()> {
        self.bind(BindMode::Transmitter, CommandId::BindTransmitter, system_id, password)
            .await
    }

    pub async fn bind_receiver(&mut self, system_id: &str, password: &str) -> SmppResult<()> {
        self.bind(BindMode::Receiver, CommandId::BindReceiver, system_id, password)
            .await
    }

    pub async fn bind_transceiver(&mut self, system_id: &str, password: &str) -> SmppResult<()> {
        self.bind(BindMode::Transceiver, CommandId::BindTransceiver, system_id, password)
            .await
    }

    async fn bind(
        &mut self,
        mode: BindMode,
        command: CommandId,
        system_id: &str,
        password: &str,
    ) -> SmppResult<()> {
        let body = BindRequest {
            system_id: system_id.to_string(),
            password: password.to_string(),
            system_type: self.config.system_type.clone(),
            interface_version: crate::pdu::INTERFACE_VERSION,
            addr_ton: Default::default(),
            addr_npi: Default::default(),
            address_range: self.config.address_range.clone(),
        };
        let header = PduHeader::for_command(command, CommandStatus::OK, self.session.next_sequence());
        let request = match mode {
            BindMode::Transmitter => Frame::BindTransmitter(header, body),
            BindMode::Receiver => Frame::BindReceiver(header, body),
            BindMode::Transceiver => Frame::BindTransceiver(header, body),
        };

        let response = self.session.request(request).await?;
        let status = response.command_status();
        if status.is_ok() {
            self.session.transition_bound(mode).await;
            tracing::info!(?mode, system_id, "bind succeeded");
            Ok(())
        } else {
            self.session.close().await;
            tracing::warn!(?mode, system_id, ?status, "bind failed");
            Err(SmppError::BindFailed(status))
        }
    }

    /// Encodes, segments, and submits `message`, returning the SMSC-assigned
    /// ID of the first accepted segment (spec §4.G `send_sms`). `options`
    /// carries the spec's defaulted `tags?`/`schedule?`/`validity?`
    /// parameters; pass `SendSmsOptions::default()` when none are needed.
    pub async fn send_sms(
        &mut self,
        from: &Address,
        to: &Address,
        message: &str,
        coding: DataCoding,
        priority: u8,
        options: SendSmsOptions,
    ) -> SmppResult<String> {
        self.require_bound(&[BindMode::Transmitter, BindMode::Transceiver])
            .await?;

        let encoded = encode_message(message, coding);
        let segments = self
            .segmenter
            .segment(&encoded, coding, self.config.csms_method)
            .map_err(|e| {
                tracing::warn!(error = ?e, coding = ?coding, "send_sms rejected by segmentation policy");
                SmppError::UnsupportedCodingForSplit
            })?;
        tracing::debug!(segment_count = segments.len(), "send_sms split message");

        let mut first_id = None;
        for segment in segments {
            let mut tlvs = segment.tlvs;
            tlvs.extend(options.tags.iter().cloned());
            let body = SubmitSm {
                service_type: String::new(),
                source_addr: from.clone(),
                dest_addr: to.clone(),
                esm_class: segment.esm_class_bits,
                protocol_id: 0,
                priority_flag: priority,
                schedule_delivery_time: options.schedule_delivery_time.clone(),
                validity_period: options.validity_period.clone(),
                registered_delivery: self.config.sms_registered_delivery_flag,
                replace_if_present_flag: 0,
                data_coding: coding.to_byte(),
                sm_default_msg_id: 0,
                short_message: segment.short_message,
                tlvs,
            };
            let header = PduHeader::for_command(
                CommandId::SubmitSm,
                CommandStatus::OK,
                self.session.next_sequence(),
            );
            let response = self
                .session
                .request(Frame::SubmitSm(header, Box::new(body)))
                .await?;

            let status = response.command_status();
            if !status.is_ok() {
                return Err(SmppError::SubmitFailed(status));
            }
            if let Frame::SubmitSmResp(_, resp) = response {
                if first_id.is_none() {
                    first_id = Some(resp.message_id);
                }
            } else {
                return Err(SmppError::ProtocolViolation(
                    "expected submit_sm_resp".to_string(),
                ));
            }
        }

        first_id.ok_or_else(|| SmppError::ProtocolViolation("no segments produced".to_string()))
    }

    /// Returns the oldest inbox entry (parsed), or `None` if none arrives
    /// before the read timeout expires (spec §4.G `read_sms`; the
    /// timeout-vs-empty distinction is resolved in SPEC_FULL.md §9).
    pub async fn read_sms(&mut self) -> SmppResult<Option<ParsedMessage>> {
        self.require_bound(&[BindMode::Receiver, BindMode::Transceiver])
            .await?;

        match self.session.next_inbox().await? {
            Some(Frame::DeliverSm(_, body)) => Ok(Some(parser::parse_sms(*body))),
            Some(_) => Err(SmppError::ProtocolViolation(
                "non deliver_sm frame in inbox".to_string(),
            )),
            None => Ok(None),
        }
    }

    /// Queries message status; returns `None` on any non-success status
    /// rather than raising (spec §4.F `Query`).
    pub async fn query_status(
        &mut self,
        message_id: &str,
        source: &Address,
    ) -> SmppResult<Option<QueryResult>> {
        let header = PduHeader::for_command(CommandId::QuerySm, CommandStatus::OK, self.session.next_sequence());
        let request = QuerySm {
            message_id: message_id.to_string(),
            source_addr: source.clone(),
        };
        let response = self.session.request(Frame::QuerySm(header, request)).await?;

        if !response.command_status().is_ok() {
            return Ok(None);
        }
        match response {
            Frame::QuerySmResp(_, QuerySmResponse {
                message_id,
                final_date,
                message_state,
                error_code,
            }) => Ok(Some(QueryResult {
                message_id,
                final_date,
                message_state,
                error_code,
            })),
            _ => Err(SmppError::ProtocolViolation(
                "expected query_sm_resp".to_string(),
            )),
        }
    }

    /// Sends ENQUIRE_LINK and awaits the response PDU for introspection
    /// (spec §4.F `Keep-alive`). Inbound ENQUIRE_LINK is always auto-replied
    /// by the session's reader task and never reaches here.
    pub async fn enquire_link(&mut self) -> SmppResult<Frame> {
        let header = PduHeader::for_command(
            CommandId::EnquireLink,
            CommandStatus::OK,
            self.session.next_sequence(),
        );
        self.session.request(Frame::EnquireLink(header)).await
    }

    /// Unbinds (if bound) and closes the transport. Never raises (spec §4.G).
    pub async fn close(&mut self) {
        if matches!(
            self.session.state().await,
            SessionState::Bound(_) | SessionState::Unbinding
        ) {
            self.session.transition_unbinding().await;
            let header = PduHeader::for_command(
                CommandId::Unbind,
                CommandStatus::OK,
                self.session.next_sequence(),
            );
            // Ignore timeout and protocol errors alike: close() never raises.
            let _ = self.session.request(Frame::Unbind(header)).await;
        }
        self.session.close().await;
    }

    async fn require_bound(&self, allowed: &[BindMode]) -> SmppResult<()> {
        match self.session.state().await {
            SessionState::Bound(mode) if allowed.contains(&mode) => Ok(()),
            other => Err(SmppError::InvalidState(format!(
                "operation requires one of {allowed:?}, session is {other:?}"
            ))),
        }
    }
}

/// Façade encoding policy (spec §4.G): DEFAULT/BINARY are opaque bytes the
/// caller already prepared; UCS2 converts from the platform's `str` to
/// big-endian UTF-16.
fn encode_message(message: &str, coding: DataCoding) -> Vec<u8> {
    match coding {
        DataCoding::Ucs2 => message.encode_utf16().flat_map(|u| u.to_be_bytes()).collect(),
        _ => message.as_bytes().to_vec(),
    }
}
