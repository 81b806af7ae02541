use crate::domain::{FormValues, OrderReceipt, SubmissionError};

/// Destination of submitted orders.
///
/// Implementations are called from a worker thread, once per submission.
pub trait OrderGateway: Send + Sync {
    fn place_order(&self, order: &FormValues) -> Result<OrderReceipt, SubmissionError>;
}
