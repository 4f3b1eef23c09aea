pub mod admin;
pub mod execute;
pub mod oracle;
pub mod reserve;
pub mod settlement;
pub mod views;
