//! Donation domain entity.
//!
//! Monetary amounts are integer cents throughout.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Fund a donation is earmarked for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Fund {
    Zakat,
    Sadaqah,
    Building,
    General,
}

impl From<&str> for Fund {
    fn from(s: &str) -> Self {
        match s {
            "zakat" => Fund::Zakat,
            "sadaqah" => Fund::Sadaqah,
            "building" => Fund::Building,
            _ => Fund::General,
        }
    }
}

impl std::fmt::Display for Fund {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fund::Zakat => write!(f, "zakat"),
            Fund::Sadaqah => write!(f, "sadaqah"),
            Fund::Building => write!(f, "building"),
            Fund::General => write!(f, "general"),
        }
    }
}

/// How a donation was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Other,
}

impl From<&str> for PaymentMethod {
    fn from(s: &str) -> Self {
        match s {
            "cash" => PaymentMethod::Cash,
            "card" => PaymentMethod::Card,
            "bank_transfer" => PaymentMethod::BankTransfer,
            _ => PaymentMethod::Other,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::Other => write!(f, "other"),
        }
    }
}

/// Donation domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// None = anonymous donation
    pub member_id: Option<Uuid>,
    pub fund: Fund,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub note: Option<String>,
    pub donated_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Donation creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDonation {
    pub member_id: Option<Uuid>,
    pub fund: Fund,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(example = 5000)]
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub note: Option<String>,
    /// Defaults to today
    pub donated_at: Option<NaiveDate>,
}

/// Aggregated donation totals over a period
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonationSummary {
    pub count: u64,
    pub total_cents: i64,
    /// Totals keyed by fund name
    pub by_fund: BTreeMap<String, i64>,
}

impl DonationSummary {
    /// Fold a list of donations into per-fund totals
    pub fn from_donations(donations: &[Donation]) -> Self {
        let mut by_fund = BTreeMap::new();
        let mut total_cents = 0i64;

        for donation in donations {
            total_cents += donation.amount_cents;
            *by_fund.entry(donation.fund.to_string()).or_insert(0) += donation.amount_cents;
        }

        Self {
            count: donations.len() as u64,
            total_cents,
            by_fund,
        }
    }
}
