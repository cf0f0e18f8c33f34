pub mod report;
pub mod user;

pub use report::{Priority, Report, ReportStatus};
pub use user::{NewRemoteUser, NewUser, User};
