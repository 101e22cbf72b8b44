// ABOUTME: Session engine — state machine, sequence allocation, and request/response correlation
// ABOUTME: A single reader task demultiplexes inbound PDUs into pending slots and an inbox (spec §4.F/§9)

use crate::codec::PduHeader;
use crate::error::{SmppError, SmppResult};
use crate::frame::{self, Frame};
use crate::pdu::{BindMode, CommandId, CommandStatus, DeliverSmResponse};
use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{split, ReadHalf, WriteHalf};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

/// The first sequence number after which allocation wraps back to 1
/// (spec §4.F/§9: values 0 and >= 2^31 are never issued).
const SEQUENCE_WRAP: u32 = 0x8000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
    Bound(BindMode),
    Unbinding,
}

type PendingMap = Arc<Mutex<HashMap<u32, oneshot::Sender<Frame>>>>;

/// Owns one SMPP session over a transport: a write half behind a mutex, a
/// background reader task, the pending-request table, and the unsolicited
/// inbox. This is the generalization of the teacher's `DefaultClient`
/// (which reads one frame per call and assumes it is the response) into the
/// dispatch-loop model spec §5 calls for.
pub struct Session<T: Transport + 'static> {
    writer: Arc<Mutex<WriteHalf<T>>>,
    state: Arc<Mutex<SessionState>>,
    pending: PendingMap,
    inbox: mpsc::UnboundedReceiver<Frame>,
    reader: JoinHandle<()>,
    next_sequence: AtomicU32,
    pub read_timeout: std::time::Duration,
}

impl<T: Transport + 'static> Session<T> {
    pub fn new(transport: T, read_timeout: std::time::Duration) -> Self {
        let (read_half, write_half) = split(transport);
        let writer = Arc::new(Mutex::new(write_half));
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let state = Arc::new(Mutex::new(SessionState::Open));
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let reader = spawn_reader(read_half, writer.clone(), pending.clone(), inbox_tx, state.clone());

        Session {
            writer,
            state,
            pending,
            inbox: inbox_rx,
            reader,
            next_sequence: AtomicU32::new(1),
            read_timeout,
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.lock().await
    }

    async fn set_state(&self, new: SessionState) {
        *self.state.lock().await = new;
    }

    /// Allocates the next outbound sequence number, wrapping per spec §4.F.
    pub fn next_sequence(&self) -> u32 {
        loop {
            let current = self.next_sequence.fetch_add(1, Ordering::Relaxed);
            if current == 0 || current >= SEQUENCE_WRAP {
                self.next_sequence.store(1, Ordering::Relaxed);
                continue;
            }
            return current;
        }
    }

    pub async fn write_frame(&self, frame: &Frame) -> SmppResult<()> {
        let mut writer = self.writer.lock().await;
        frame::write_frame(&mut *writer, frame)
            .await
            .map_err(SmppError::from)
    }

    /// Issues a request, registers its sequence in the pending table, writes
    /// it, and waits for the matching response within `read_timeout`. On
    /// timeout the pending slot is left in place (spec §5) so a late
    /// response can still resolve it; a closed session resolves immediately
    /// with `TransportClosed`.
    pub async fn request(&self, out: Frame) -> SmppResult<Frame> {
        let seq = out.sequence_number();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(seq, tx);

        if let Err(e) = self.write_frame(&out).await {
            self.pending.lock().await.remove(&seq);
            return Err(e);
        }

        match tokio::time::timeout(self.read_timeout, rx).await {
            Ok(Ok(frame)) => Ok(frame),
            Ok(Err(_)) => Err(SmppError::TransportClosed),
            Err(_) => Err(SmppError::Timeout),
        }
    }

    /// Returns the oldest inbox entry, or `None` if none arrives within the
    /// configured read timeout (spec §4.G `read_sms`).
    pub async fn next_inbox(&mut self) -> SmppResult<Option<Frame>> {
        match tokio::time::timeout(self.read_timeout, self.inbox.recv()).await {
            Ok(Some(frame)) => Ok(Some(frame)),
            Ok(None) => Err(SmppError::TransportClosed),
            Err(_) => Ok(None),
        }
    }

    pub fn try_next_inbox(&mut self) -> Option<Frame> {
        self.inbox.try_recv().ok()
    }

    pub async fn transition_bound(&self, mode: BindMode) {
        self.set_state(SessionState::Bound(mode)).await;
    }

    pub async fn transition_unbinding(&self) {
        self.set_state(SessionState::Unbinding).await;
    }

    pub async fn close(&self) {
        use tokio::io::AsyncWriteExt;
        self.set_state(SessionState::Closed).await;
        self.reader.abort();
        let _ = self.writer.lock().await.shutdown().await;
    }
}

fn spawn_reader<T: Transport + 'static>(
    mut read_half: ReadHalf<T>,
    writer: Arc<Mutex<WriteHalf<T>>>,
    pending: PendingMap,
    inbox_tx: mpsc::UnboundedSender<Frame>,
    state: Arc<Mutex<SessionState>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let outcome = frame::read_frame(&mut read_half).await;
            match outcome {
                Ok(Some(inbound)) => {
                    if handle_inbound(inbound, &writer, &pending, &inbox_tx)
                        .await
                        .is_err()
                    {
                        tracing::warn!("protocol violation on inbound PDU; closing session");
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!("transport closed cleanly; ending reader task");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "codec error on inbound PDU; closing session");
                    break;
                }
            }
        }
        *state.lock().await = SessionState::Closed;
        pending.lock().await.clear();
    })
}

/// Applies spec §4.F's dispatch rules to one inbound PDU. Returns `Err(())`
/// only for an unsolicited response to a command the core recognizes — the
/// byte stream can no longer be trusted to stay aligned (spec §9 open
/// question: protocol_violation, session resets).
async fn handle_inbound<T: Transport + 'static>(
    inbound: Frame,
    writer: &Arc<Mutex<WriteHalf<T>>>,
    pending: &PendingMap,
    inbox_tx: &mpsc::UnboundedSender<Frame>,
) -> Result<(), ()> {
    let header = *inbound.header();

    match &inbound {
        Frame::EnquireLink(_) => {
            let resp = Frame::EnquireLinkResp(PduHeader::for_command(
                CommandId::EnquireLinkResp,
                CommandStatus::OK,
                header.sequence_number,
            ));
            let mut w = writer.lock().await;
            let _ = frame::write_frame(&mut *w, &resp).await;
            Ok(())
        }
        Frame::DeliverSm(_, _) => {
            let resp = Frame::DeliverSmResp(
                PduHeader::for_command(CommandId::DeliverSmResp, CommandStatus::OK, header.sequence_number),
                DeliverSmResponse::default(),
            );
            {
                let mut w = writer.lock().await;
                let _ = frame::write_frame(&mut *w, &resp).await;
            }
            let _ = inbox_tx.send(inbound);
            Ok(())
        }
        Frame::GenericNack(_) => {
            let mut pend = pending.lock().await;
            if let Some(tx) = pend.remove(&header.sequence_number) {
                let _ = tx.send(inbound);
            } else if let Some(&any_seq) = pend.keys().next() {
                if let Some(tx) = pend.remove(&any_seq) {
                    let _ = tx.send(inbound);
                }
            }
            Ok(())
        }
        Frame::Unknown(_, _) => {
            if header.command_id_raw & 0x8000_0000 != 0 {
                // Unrecognized response to no known sequence: ignored (spec §6).
                Ok(())
            } else {
                let nack = Frame::GenericNack(PduHeader::for_command(
                    CommandId::GenericNack,
                    CommandStatus::INVALID_COMMAND_ID,
                    header.sequence_number,
                ));
                let mut w = writer.lock().await;
                let _ = frame::write_frame(&mut *w, &nack).await;
                Ok(())
            }
        }
        _ => {
            let mut pend = pending.lock().await;
            match pend.remove(&header.sequence_number) {
                Some(tx) => {
                    let _ = tx.send(inbound);
                    Ok(())
                }
                None => Err(()),
            }
        }
    }
}
