mod copy;
mod exists;
mod identical;

pub use copy::{copy_with_timestamp, format_timestamp, timestamped_name};
pub use exists::path_exists;
pub use identical::{CompareMode, files_identical};
