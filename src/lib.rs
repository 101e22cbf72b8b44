pub mod codec;
pub mod config;
mod datetime;
mod error;
pub mod frame;
mod parser;
pub mod pdu;
mod segmenter;
pub mod session;
mod sms;
pub mod transport;

pub mod client;

pub use client::{Client, QueryResult, SendSmsOptions};
pub use codec::PduHeader;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use datetime::{
    parse_receipt_date, AbsoluteTime, DateTimeError, ReceiptDate, RelativeTime, SmppDateTime,
};
pub use error::{CodecError, SegmentError, SmppError, SmppResult};
pub use frame::Frame;
pub use segmenter::{CsmsMethod, Segment, Segmenter};
pub use session::SessionState;
pub use sms::{DeliveryReceipt, ParsedMessage, ReceiptFields, ReceiptStatus, Sms};
pub use transport::Transport;

/// Error returned by most functions.
///
/// When writing a real application, one might want to consider a specialized
/// error handling crate or defining an error type as an `enum` of causes.
/// However, for our example, using a boxed `std::error::Error` is sufficient.
///
/// For performance reasons, boxing is avoided on any hot path — `SmppError`
/// is a concrete `enum` everywhere inside the core. This alias only exists
/// at the crate's outward boundary for applications that want one error type
/// to propagate with `?`.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for applications consuming this crate.
///
/// # Examples
///
/// ```rust,no_run
/// use smpp_client::{Client, ClientConfig, SendSmsOptions};
/// use smpp_client::pdu::{Address, DataCoding, NumericPlanIndicator, TypeOfNumber};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = Client::connect("localhost:2775", ClientConfig::default()).await?;
///     client.bind_transmitter("system_id", "password").await?;
///
///     let from = Address::new("0987654321", TypeOfNumber::International, NumericPlanIndicator::Isdn)?;
///     let to = Address::new("1234567890", TypeOfNumber::International, NumericPlanIndicator::Isdn)?;
///     let message_id = client
///         .send_sms(&from, &to, "Hello, World!", DataCoding::Default, 0, SendSmsOptions::default())
///         .await?;
///     println!("message sent with id: {message_id}");
///
///     client.close().await;
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
