//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages transaction lifecycle
//! (begin, commit, rollback). The two multi-step workflows that need
//! atomicity run through here: tenant registration (organization +
//! first admin) and case creation (number allocation + insert under a
//! serializable transaction).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    entities, CaseRepository, CaseStore, DonationRepository, DonationStore, EducationRepository,
    EducationStore, EventRepository, EventStore, MemberRepository, MemberStore,
    OrganizationRepository, OrganizationStore, PlanRepository, PlanStore, UserRepository,
    UserStore,
};
use crate::domain::{
    CaseCategory, CasePriority, CaseStatus, Organization, ServiceCase, User, UserRole,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The trait is not mockable directly due to generic
/// methods; tests mock the repositories and implement this trait by
/// hand.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get organization repository
    fn organizations(&self) -> Arc<dyn OrganizationRepository>;

    /// Get member repository
    fn members(&self) -> Arc<dyn MemberRepository>;

    /// Get service case repository
    fn cases(&self) -> Arc<dyn CaseRepository>;

    /// Get donation repository
    fn donations(&self) -> Arc<dyn DonationRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;

    /// Get education repository
    fn education(&self) -> Arc<dyn EducationRepository>;

    /// Get subscription plan repository
    fn plans(&self) -> Arc<dyn PlanRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled
    /// back on error. Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    ///
    /// Used where read-then-write sequences must not interleave, such
    /// as case-number allocation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get organization repository for this transaction
    pub fn organizations(&self) -> TxOrganizationRepository<'_> {
        TxOrganizationRepository::new(self.txn)
    }

    /// Get service case repository for this transaction
    pub fn cases(&self) -> TxCaseRepository<'_> {
        TxCaseRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    organization_repo: Arc<OrganizationStore>,
    member_repo: Arc<MemberStore>,
    case_repo: Arc<CaseStore>,
    donation_repo: Arc<DonationStore>,
    event_repo: Arc<EventStore>,
    education_repo: Arc<EducationStore>,
    plan_repo: Arc<PlanStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            organization_repo: Arc::new(OrganizationStore::new(db.clone())),
            member_repo: Arc::new(MemberStore::new(db.clone())),
            case_repo: Arc::new(CaseStore::new(db.clone())),
            donation_repo: Arc::new(DonationStore::new(db.clone())),
            event_repo: Arc::new(EventStore::new(db.clone())),
            education_repo: Arc::new(EducationStore::new(db.clone())),
            plan_repo: Arc::new(PlanStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn organizations(&self) -> Arc<dyn OrganizationRepository> {
        self.organization_repo.clone()
    }

    fn members(&self) -> Arc<dyn MemberRepository> {
        self.member_repo.clone()
    }

    fn cases(&self) -> Arc<dyn CaseRepository> {
        self.case_repo.clone()
    }

    fn donations(&self) -> Arc<dyn DonationRepository> {
        self.donation_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    fn education(&self) -> Arc<dyn EducationRepository> {
        self.education_repo.clone()
    }

    fn plans(&self) -> Arc<dyn PlanRepository> {
        self.plan_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create a staff account inside the transaction
    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
        organization_id: Option<Uuid>,
    ) -> AppResult<User> {
        let now = Utc::now();
        let active_model = entities::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            role: Set(role.to_string()),
            organization_id: Set(organization_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}

/// Transaction-aware organization repository.
pub struct TxOrganizationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOrganizationRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create an organization inside the transaction
    pub async fn create(&self, name: String, slug: String) -> AppResult<Organization> {
        let now = Utc::now();
        let active_model = entities::organization::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            address: Set(None),
            phone: Set(None),
            status: Set(crate::domain::OrganizationStatus::Active.to_string()),
            plan_id: Set(None),
            billing_cycle: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }
}

/// Cases with the given prefix, numerically greatest number first.
///
/// Sequence numbers grow past the zero-pad width, so plain string
/// ordering would rank `...-9999` above `...-10000`. Under a fixed
/// prefix a longer number is always numerically greater, so length
/// sorts before lexicographic value.
fn latest_case_number_query(
    organization_id: Uuid,
    prefix: &str,
) -> sea_orm::Select<entities::service_case::Entity> {
    use entities::service_case::{Column, Entity as CaseEntity};

    let number_length: SimpleExpr = Func::char_length(Expr::col(Column::CaseNumber)).into();

    CaseEntity::find()
        .filter(Column::OrganizationId.eq(organization_id))
        .filter(Column::CaseNumber.starts_with(prefix))
        .order_by_desc(number_length)
        .order_by_desc(Column::CaseNumber)
}

/// Fields needed to insert a freshly numbered case.
pub struct NewCaseRecord {
    pub organization_id: Uuid,
    pub member_id: Uuid,
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub category: CaseCategory,
    pub priority: CasePriority,
    pub amount_requested_cents: Option<i64>,
}

/// Transaction-aware service case repository.
///
/// Number allocation and insert run on the same transaction so the
/// read-max/increment sequence is serialized against concurrent
/// allocations.
pub struct TxCaseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCaseRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Greatest existing case number with the given prefix, if any
    pub async fn latest_case_number(
        &self,
        organization_id: Uuid,
        prefix: &str,
    ) -> AppResult<Option<String>> {
        let latest = latest_case_number_query(organization_id, prefix)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(latest.map(|model| model.case_number))
    }

    /// Insert a new case with an already-allocated number
    pub async fn create(&self, record: NewCaseRecord) -> AppResult<ServiceCase> {
        let now = Utc::now();
        let active_model = entities::service_case::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(record.organization_id),
            member_id: Set(record.member_id),
            case_number: Set(record.case_number),
            title: Set(record.title),
            description: Set(record.description),
            category: Set(record.category.to_string()),
            status: Set(CaseStatus::Open.to_string()),
            priority: Set(record.priority.to_string()),
            amount_requested_cents: Set(record.amount_requested_cents),
            amount_approved_cents: Set(None),
            opened_at: Set(now),
            resolved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(ServiceCase::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn case_numbers_order_numerically_past_the_pad_width() {
        let sql = latest_case_number_query(Uuid::new_v4(), "CASE-2026-")
            .build(DbBackend::Postgres)
            .to_string();

        // Length-first ordering ranks CASE-2026-10000 above CASE-2026-9999
        assert!(sql.contains("CHAR_LENGTH"));
        assert!(sql.contains("CASE-2026-"));
    }
}
