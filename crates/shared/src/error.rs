use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Acknowledgement from the email delivery service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub status: u16,
}

/// A failed delivery attempt. Both variants are recoverable by user retry;
/// the controller surfaces them uniformly as a generic banner message.
#[derive(Debug, Clone, Error)]
pub enum DeliveryFault {
    #[error("email service rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("failed to reach email service: {0}")]
    Transport(String),
}
