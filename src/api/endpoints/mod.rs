pub mod appointments;
pub mod chat;
pub mod emergency;
pub mod health;
pub mod medications;
pub mod notifications;
pub mod vitals;
