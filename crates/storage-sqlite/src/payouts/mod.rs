//! SQLite storage implementation for payout requests, commissions and the
//! ledger unit of work.

mod model;
mod repository;
mod unit_of_work;

pub use repository::PayoutRepository;
pub use unit_of_work::SqliteLedgerUnitOfWork;
