pub mod annotate;
pub mod blacklist;
pub mod html;
pub mod index;
pub mod normalize;
pub mod orchestrator;
pub mod parser;
pub mod splitter;
pub mod storage;

pub use annotate::Annotator;
pub use blacklist::Blacklist;
pub use index::{AwardTally, OscarIndex};
pub use orchestrator::{
    load_active_channels, resolve_target_date, ProgramFetcher, DATE_PATH_TOMORROW,
    DATE_PATH_YESTERDAY,
};
pub use parser::parse_programs;
pub use storage::{
    cleanup_old_programs, last_seven_days, program_file, LocalStorage, Storage, StorageExt,
};
