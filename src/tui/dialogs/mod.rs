//! Modal dialogs

pub mod backup;
pub mod confirm;
pub mod help;
