pub mod bank;
pub mod csv;
pub mod gateway;
pub mod model;
pub mod settlement;

pub use bank::{Bank, BankError};
pub use gateway::{Dispatcher, PaymentError, PaymentGateway, Registry, Settled};
pub use model::{BankId, ClientId, PaymentDetails, PaymentOutcome, PaymentRequest, Paymode};
pub use settlement::{AlwaysApprove, AlwaysDecline, MockSettlement, Settlement};
