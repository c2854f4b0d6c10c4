pub mod alerts;
pub mod catalog;
pub mod chat;
pub mod history;
pub mod kpi;
pub mod purchase_orders;
pub mod replenishment;
pub mod session;
