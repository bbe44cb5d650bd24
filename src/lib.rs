pub mod api;
pub mod config;
pub mod layout;
pub mod observability;
pub mod print_jobs;
pub mod qr;
