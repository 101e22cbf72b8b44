// ABOUTME: Typed PDU model — header fields plus a body type per recognized command (spec §4.C)
// ABOUTME: Each body module owns its own encode/decode; framing lives one layer up in frame.rs

mod address;
mod bind;
mod command_id;
mod command_status;
mod data_coding;
mod deliver_sm;
pub mod esm_class;
mod query_sm;
mod submit_sm;
mod tlv;
mod type_of_number;

pub use address::Address;
pub use bind::{BindMode, BindRequest, BindResponse, INTERFACE_VERSION};
pub use command_id::CommandId;
pub use command_status::CommandStatus;
pub use data_coding::DataCoding;
pub use deliver_sm::{DeliverSm, DeliverSmResponse};
pub use query_sm::{QuerySm, QuerySmResponse, message_state};
pub use submit_sm::{SubmitSm, SubmitSmResponse};
pub use tlv::{Tlv, tags};
pub use type_of_number::{NumericPlanIndicator, TypeOfNumber};
