//! Member repository. All queries are scoped to one organization.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::member::{self, ActiveModel, Entity as MemberEntity};
use crate::domain::{CreateMember, Member, MemberStatus, UpdateMember};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Create a new member in the organization
    async fn create(&self, organization_id: Uuid, data: CreateMember) -> AppResult<Member>;

    /// Find member by ID within the organization
    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Member>>;

    /// Paginated list, newest first, with optional name search
    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<Member>, u64)>;

    /// Update member fields
    async fn update(&self, organization_id: Uuid, id: Uuid, data: UpdateMember)
        -> AppResult<Member>;

    /// Delete member
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Count members of the organization
    async fn count(&self, organization_id: Uuid) -> AppResult<u64>;
}

/// Case-insensitive match of the search term against either name part
fn name_search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", term);
    Condition::any()
        .add(Expr::col(member::Column::FirstName).ilike(pattern.clone()))
        .add(Expr::col(member::Column::LastName).ilike(pattern))
}

/// Concrete implementation of MemberRepository
pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, organization_id: Uuid, id: Uuid) -> AppResult<member::Model> {
        MemberEntity::find_by_id(id)
            .filter(member::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn create(&self, organization_id: Uuid, data: CreateMember) -> AppResult<Member> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            phone: Set(data.phone),
            status: Set(MemberStatus::Active.to_string()),
            joined_at: Set(data.joined_at.unwrap_or_else(|| now.date_naive())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Member::from(model))
    }

    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Member>> {
        let result = MemberEntity::find_by_id(id)
            .filter(member::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Member::from))
    }

    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<Member>, u64)> {
        let mut query = MemberEntity::find()
            .filter(member::Column::OrganizationId.eq(organization_id))
            .order_by_desc(member::Column::CreatedAt);

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            query = query.filter(name_search_condition(term.trim()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Member::from).collect(), total))
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateMember,
    ) -> AppResult<Member> {
        let mut active: ActiveModel = self.find_model(organization_id, id).await?.into();

        if let Some(first_name) = data.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = data.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = data.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = data.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(status) = data.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Member::from(model))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let model = self.find_model(organization_id, id).await?;
        MemberEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn count(&self, organization_id: Uuid) -> AppResult<u64> {
        MemberEntity::find()
            .filter(member::Column::OrganizationId.eq(organization_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn name_search_is_case_insensitive() {
        let sql = MemberEntity::find()
            .filter(name_search_condition("Fatima"))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("%Fatima%"));
    }
}
