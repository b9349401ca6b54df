pub mod backup;
pub mod controls;
pub mod history;
pub mod journal;
pub mod query;
pub mod session;
pub mod store;
