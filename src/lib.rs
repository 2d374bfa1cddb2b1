//! Backend for a condominium administration app: resident accounts, the
//! revenue/expense ledger, bulletin posts and the aggregated dashboard.

pub mod auth;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod ledger;
pub mod models;
pub mod routes;
