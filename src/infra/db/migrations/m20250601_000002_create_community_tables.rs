//! Migration: Create members, service cases, donations, events, RSVPs,
//! classes and enrollments tables.
//!
//! The unique index on (organization_id, case_number) backs case-number
//! allocation: a concurrent allocation of the same number fails the
//! insert instead of producing a duplicate.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Members::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Members::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Members::FirstName).string().not_null())
                    .col(ColumnDef::new(Members::LastName).string().not_null())
                    .col(ColumnDef::new(Members::Email).string().null())
                    .col(ColumnDef::new(Members::Phone).string().null())
                    .col(ColumnDef::new(Members::Status).string().not_null())
                    .col(ColumnDef::new(Members::JoinedAt).date().not_null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Members::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_organization_id")
                            .from(Members::Table, Members::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_members_organization_id")
                    .table(Members::Table)
                    .col(Members::OrganizationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceCases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCases::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceCases::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(ServiceCases::MemberId).uuid().not_null())
                    .col(ColumnDef::new(ServiceCases::CaseNumber).string().not_null())
                    .col(ColumnDef::new(ServiceCases::Title).string().not_null())
                    .col(ColumnDef::new(ServiceCases::Description).text().null())
                    .col(ColumnDef::new(ServiceCases::Category).string().not_null())
                    .col(ColumnDef::new(ServiceCases::Status).string().not_null())
                    .col(ColumnDef::new(ServiceCases::Priority).string().not_null())
                    .col(
                        ColumnDef::new(ServiceCases::AmountRequestedCents)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCases::AmountApprovedCents)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCases::OpenedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCases::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_cases_organization_id")
                            .from(ServiceCases::Table, ServiceCases::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_cases_member_id")
                            .from(ServiceCases::Table, ServiceCases::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_cases_org_case_number")
                    .table(ServiceCases::Table)
                    .col(ServiceCases::OrganizationId)
                    .col(ServiceCases::CaseNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Donations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Donations::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Donations::MemberId).uuid().null())
                    .col(ColumnDef::new(Donations::Fund).string().not_null())
                    .col(ColumnDef::new(Donations::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Donations::Method).string().not_null())
                    .col(ColumnDef::new(Donations::Note).text().null())
                    .col(ColumnDef::new(Donations::DonatedAt).date().not_null())
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_organization_id")
                            .from(Donations::Table, Donations::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_member_id")
                            .from(Donations::Table, Donations::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_org_donated_at")
                    .table(Donations::Table)
                    .col(Donations::OrganizationId)
                    .col(Donations::DonatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Events::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Location).string().null())
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::EndsAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Events::Capacity).integer().null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_organization_id")
                            .from(Events::Table, Events::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventRsvps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventRsvps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EventRsvps::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventRsvps::MemberId).uuid().not_null())
                    .col(ColumnDef::new(EventRsvps::Status).string().not_null())
                    .col(
                        ColumnDef::new(EventRsvps::RespondedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rsvps_event_id")
                            .from(EventRsvps::Table, EventRsvps::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rsvps_member_id")
                            .from(EventRsvps::Table, EventRsvps::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_rsvps_event_member")
                    .table(EventRsvps::Table)
                    .col(EventRsvps::EventId)
                    .col(EventRsvps::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Classes::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::TeacherName).string().null())
                    .col(ColumnDef::new(Classes::Schedule).string().null())
                    .col(ColumnDef::new(Classes::Capacity).integer().null())
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Classes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_organization_id")
                            .from(Classes::Table, Classes::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Enrollments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Enrollments::ClassId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::MemberId).uuid().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_class_id")
                            .from(Enrollments::Table, Enrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_member_id")
                            .from(Enrollments::Table, Enrollments::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_class_member")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventRsvps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceCases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
    OrganizationId,
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
    JoinedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ServiceCases {
    Table,
    Id,
    OrganizationId,
    MemberId,
    CaseNumber,
    Title,
    Description,
    Category,
    Status,
    Priority,
    AmountRequestedCents,
    AmountApprovedCents,
    OpenedAt,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Donations {
    Table,
    Id,
    OrganizationId,
    MemberId,
    Fund,
    AmountCents,
    Method,
    Note,
    DonatedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    OrganizationId,
    Title,
    Description,
    Location,
    StartsAt,
    EndsAt,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum EventRsvps {
    Table,
    Id,
    EventId,
    MemberId,
    Status,
    RespondedAt,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
    OrganizationId,
    Name,
    TeacherName,
    Schedule,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    ClassId,
    MemberId,
    EnrolledAt,
}
