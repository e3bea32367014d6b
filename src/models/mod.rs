pub mod category;
pub mod dashboard;
pub mod job;
pub mod notification;
pub mod report;
pub mod user;
pub mod worker;
