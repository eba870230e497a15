//! Infrastructure layer - Database, cache and persistence concerns.

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::Database;
pub use unit_of_work::{
    NewCaseRecord, Persistence, TransactionContext, TxCaseRepository, TxOrganizationRepository,
    TxUserRepository, UnitOfWork,
};
