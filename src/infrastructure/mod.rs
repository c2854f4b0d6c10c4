pub mod events;
pub mod gateway;
pub mod http;
pub mod sqlite;
