pub mod chart;
pub mod chat;
