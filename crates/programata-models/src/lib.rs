pub mod channel;
pub mod exclusion;
pub mod movie;
pub mod oscar;
pub mod program;
pub mod schedule;

pub use channel::{Channel, ChannelList, ChannelMeta};
pub use exclusion::{BlacklistDoc, ExclusionEntry, ExclusionScope};
pub use movie::{MovieCatalog, MovieEntry};
pub use oscar::{CategoryRecord, NomineeRef, OscarAnnotation, OscarsFile, WatchInfo};
pub use program::ProgramEntry;
pub use schedule::{ActivePrograms, ChannelPrograms, FetchMetadata};
