pub mod entry;
pub mod policy;
