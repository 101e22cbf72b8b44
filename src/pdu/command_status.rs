// ABOUTME: SMPP command_status codes; not a closed enum on the wire (SMSCs are
// ABOUTME: free to return vendor-specific values), modeled as a newtype with named constants

use std::fmt;

/// A 32-bit command status code. `0` is success (`ESME_ROK`); any other value
/// in a response indicates a failure, with the value itself identifying the
/// reason. Named constants cover the statuses the core has occasion to
/// inspect; unrecognized values round-trip as `CommandStatus(raw)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandStatus(pub u32);

impl CommandStatus {
    pub const OK: CommandStatus = CommandStatus(0x0000_0000);
    pub const INVALID_MSG_LENGTH: CommandStatus = CommandStatus(0x0000_0001);
    pub const INVALID_COMMAND_LENGTH: CommandStatus = CommandStatus(0x0000_0002);
    pub const INVALID_COMMAND_ID: CommandStatus = CommandStatus(0x0000_0003);
    pub const INCORRECT_BIND_STATUS: CommandStatus = CommandStatus(0x0000_0004);
    pub const ALREADY_BOUND: CommandStatus = CommandStatus(0x0000_0005);
    pub const SYSTEM_ERROR: CommandStatus = CommandStatus(0x0000_0008);
    pub const INVALID_SOURCE_ADDRESS: CommandStatus = CommandStatus(0x0000_000A);
    pub const INVALID_DEST_ADDRESS: CommandStatus = CommandStatus(0x0000_000B);
    pub const INVALID_MESSAGE_ID: CommandStatus = CommandStatus(0x0000_000C);
    pub const BIND_FAILED: CommandStatus = CommandStatus(0x0000_000D);
    pub const INVALID_PASSWORD: CommandStatus = CommandStatus(0x0000_000E);
    pub const INVALID_SYSTEM_ID: CommandStatus = CommandStatus(0x0000_000F);
    pub const MESSAGE_QUEUE_FULL: CommandStatus = CommandStatus(0x0000_0014);

    pub fn is_ok(&self) -> bool {
        *self == Self::OK
    }
}

impl From<u32> for CommandStatus {
    fn from(raw: u32) -> Self {
        CommandStatus(raw)
    }
}

impl From<CommandStatus> for u32 {
    fn from(status: CommandStatus) -> u32 {
        status.0
    }
}

impl fmt::Debug for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::OK => "ESME_ROK",
            Self::INVALID_MSG_LENGTH => "ESME_RINVMSGLEN",
            Self::INVALID_COMMAND_LENGTH => "ESME_RINVCMDLEN",
            Self::INVALID_COMMAND_ID => "ESME_RINVCMDID",
            Self::INCORRECT_BIND_STATUS => "ESME_RINVBNDSTS",
            Self::ALREADY_BOUND => "ESME_RALYBND",
            Self::SYSTEM_ERROR => "ESME_RSYSERR",
            Self::INVALID_SOURCE_ADDRESS => "ESME_RINVSRCADR",
            Self::INVALID_DEST_ADDRESS => "ESME_RINVDSTADR",
            Self::INVALID_MESSAGE_ID => "ESME_RINVMSGID",
            Self::BIND_FAILED => "ESME_RBINDFAIL",
            Self::INVALID_PASSWORD => "ESME_RINVPASWD",
            Self::INVALID_SYSTEM_ID => "ESME_RINVSYSID",
            Self::MESSAGE_QUEUE_FULL => "ESME_RMSGQFUL",
            _ => return write!(f, "CommandStatus(0x{:08X})", self.0),
        };
        write!(f, "{name} (0x{:08X})", self.0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
