//! HTTP request handlers.

pub mod auth_handler;
pub mod case_handler;
pub mod donation_handler;
pub mod education_handler;
pub mod event_handler;
pub mod member_handler;
pub mod organization_handler;
pub mod platform_handler;

pub use auth_handler::auth_routes;
pub use case_handler::case_routes;
pub use donation_handler::donation_routes;
pub use education_handler::education_routes;
pub use event_handler::event_routes;
pub use member_handler::member_routes;
pub use organization_handler::organization_routes;
pub use platform_handler::platform_routes;
