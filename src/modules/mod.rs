pub mod admin;
pub mod auth;
pub mod catalog;
pub mod hub;
pub mod notification;
pub mod order;
pub mod payment;
pub mod provider;
pub mod user;
pub mod wallet;

mod router;
pub use router::get_router;
