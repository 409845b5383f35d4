pub mod aggregator;
pub mod chat;
pub mod providers;
pub mod segments;
