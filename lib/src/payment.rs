// lib/src/payment.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use models::hostel::PaymentMethod;

/// Body of a payment request against an invoice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub method: Option<PaymentMethod>,
    pub reference: Option<String>,
}

/// What the payment provider is told about a settled invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotice {
    pub invoice_no: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("payment provider unreachable: {0}")]
    Unavailable(String),
    #[error("payment provider rejected the notice: {0}")]
    Rejected(String),
}

/// Outbound notification to a payment provider.
///
/// Notification is advisory: callers log a failure and still record the
/// payment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn notify(&self, notice: &PaymentNotice) -> Result<(), PaymentGatewayError>;
}

/// Stand-in provider that only logs.
#[derive(Debug, Default, Clone)]
pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn notify(&self, notice: &PaymentNotice) -> Result<(), PaymentGatewayError> {
        info!(
            "Simulated gateway accepted {} of {:.2} via {:?}",
            notice.invoice_no, notice.amount, notice.method
        );
        Ok(())
    }
}
