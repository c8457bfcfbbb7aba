//! Core domain types for the payment gateway.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Client (merchant) identifier.
pub type ClientId = String;

/// Payment mode identifier, e.g. `"UPI"` or `"Netbanking"`.
pub type Paymode = String;

/// Bank identifier. A bank is registered under its name.
pub type BankId = String;

/// Opaque payment detail fields (card number, expiry, nested objects...).
///
/// Dispatch never looks inside; the map is only handed to settlement.
pub type PaymentDetails = HashMap<String, serde_json::Value>;

/// A single payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub client: ClientId,
    pub paymode: Paymode,
    #[serde(default)]
    pub details: PaymentDetails,
}

impl PaymentRequest {
    pub fn new(client: impl Into<ClientId>, paymode: impl Into<Paymode>) -> Self {
        Self {
            client: client.into(),
            paymode: paymode.into(),
            details: PaymentDetails::new(),
        }
    }

    /// Attach a detail field.
    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Result of dispatching one [`PaymentRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub client: ClientId,
    pub paymode: Paymode,
    /// Bank the request was routed to, if any bank was selected.
    pub bank: Option<BankId>,
    pub success: bool,
}
