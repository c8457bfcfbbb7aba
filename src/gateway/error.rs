//! Error types for payment dispatch.

use thiserror::Error;

use crate::model::{BankId, ClientId, Paymode};

/// Why a payment did not go through.
///
/// [`Dispatcher::make_payment`](super::Dispatcher::make_payment) folds all of
/// these into `false`; [`Dispatcher::dispatch`](super::Dispatcher::dispatch)
/// keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("client {0} not found")]
    UnknownClient(ClientId),

    #[error("client {0} does not support paymode {1}")]
    UnsupportedPaymode(ClientId, Paymode),

    #[error("no bank supports paymode {0}")]
    NoBankForPaymode(Paymode),

    #[error("payment declined by bank {bank}")]
    Declined { bank: BankId },
}

impl PaymentError {
    /// Bank the payment was routed to before failing, if routing got that far.
    pub fn bank(&self) -> Option<&BankId> {
        match self {
            PaymentError::Declined { bank } => Some(bank),
            _ => None,
        }
    }
}
