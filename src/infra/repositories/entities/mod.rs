//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod class;
pub mod donation;
pub mod enrollment;
pub mod event;
pub mod event_rsvp;
pub mod member;
pub mod organization;
pub mod service_case;
pub mod subscription_plan;
pub mod user;
