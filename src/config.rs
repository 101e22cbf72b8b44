// ABOUTME: Client configuration — immutable once the session is constructed (spec §5)
// ABOUTME: Built with a small fluent builder, matching the teacher's ClientBuilder/BindCredentials idiom

use crate::segmenter::CsmsMethod;
use std::time::Duration;

/// Configuration consumed by the core (spec §6 Configuration surface).
/// Per-message addressing (source/destination TON/NPI) is carried on the
/// `Address` values passed to `send_sms`/`query_status` directly rather than
/// duplicated here, since the façade never needs a config-level default for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub csms_method: CsmsMethod,
    pub system_type: String,
    pub address_range: String,
    pub sms_registered_delivery_flag: u8,
    pub read_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            csms_method: CsmsMethod::Sar16Bit,
            system_type: String::new(),
            address_range: String::new(),
            sms_registered_delivery_flag: 0,
            read_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Fluent builder for `ClientConfig`, in the shape of the teacher's
/// `ClientBuilder`/`BindCredentials` construction pattern.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        ClientConfigBuilder::default()
    }

    pub fn csms_method(mut self, method: CsmsMethod) -> Self {
        self.config.csms_method = method;
        self
    }

    pub fn system_type(mut self, system_type: impl Into<String>) -> Self {
        self.config.system_type = system_type.into();
        self
    }

    pub fn address_range(mut self, address_range: impl Into<String>) -> Self {
        self.config.address_range = address_range.into();
        self
    }

    pub fn registered_delivery(mut self, flag: u8) -> Self {
        self.config.sms_registered_delivery_flag = flag;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
