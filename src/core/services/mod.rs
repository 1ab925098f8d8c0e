pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{aggregate, SummaryService, Totals};
pub use transaction_service::TransactionService;
