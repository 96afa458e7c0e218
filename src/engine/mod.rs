pub mod amount;
pub mod catalog;
pub mod helpers;
pub mod poller;
pub mod stats;
