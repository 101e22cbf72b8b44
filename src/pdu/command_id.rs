// ABOUTME: The closed set of SMPP command IDs the session engine recognizes
// ABOUTME: Response IDs are the request ID with the high bit (0x80000000) set

use num_enum::TryFromPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
pub enum CommandId {
    GenericNack = 0x8000_0000,
    BindReceiver = 0x0000_0001,
    BindReceiverResp = 0x8000_0001,
    BindTransmitter = 0x0000_0002,
    BindTransmitterResp = 0x8000_0002,
    QuerySm = 0x0000_0003,
    QuerySmResp = 0x8000_0003,
    SubmitSm = 0x0000_0004,
    SubmitSmResp = 0x8000_0004,
    DeliverSm = 0x0000_0005,
    DeliverSmResp = 0x8000_0005,
    Unbind = 0x0000_0006,
    UnbindResp = 0x8000_0006,
    BindTransceiver = 0x0000_0009,
    BindTransceiverResp = 0x8000_0009,
    EnquireLink = 0x0000_0015,
    EnquireLinkResp = 0x8000_0015,
}

impl CommandId {
    pub fn is_response(&self) -> bool {
        u32::from(*self) & 0x8000_0000 != 0
    }

    /// The response ID that answers this request ID, e.g. `SubmitSm` ->
    /// `SubmitSmResp`. Used by the auto-reply rules for ENQUIRE_LINK and
    /// DELIVER_SM (spec §4.F rules b/c).
    pub fn response_id(&self) -> Option<CommandId> {
        let raw = u32::from(*self) | 0x8000_0000;
        CommandId::try_from(raw).ok()
    }
}

impl From<CommandId> for u32 {
    fn from(id: CommandId) -> u32 {
        id as u32
    }
}
