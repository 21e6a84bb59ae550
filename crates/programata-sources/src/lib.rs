pub mod error;
pub mod schedule;
pub mod watch;

pub use error::SourceError;
pub use schedule::{ScheduleClient, SchedulePage, BASE_URL, DATE_PATH_TODAY};
pub use watch::WatchProviderClient;
