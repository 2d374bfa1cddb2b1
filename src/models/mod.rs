pub mod dashboard;
pub mod expense;
pub mod post;
pub mod revenue;
pub mod user;
