pub mod chat_log_repo;
pub mod migrations;
pub mod session_repo;
