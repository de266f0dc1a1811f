//! Process exit codes of the exporter, taken from BSD `sysexits.h`

/// A row names a level whose parent category is missing
pub const DATAERR: i32 = 65;

/// Data directory or one of its workbooks cannot be read
pub const NOINPUT: i32 = 66;

/// Unexpected failure inside the exporter
pub const SOFTWARE: i32 = 70;

/// `taxonomy_hierarchy.json` cannot be written
pub const CANTCREAT: i32 = 73;

/// Working directory unavailable
pub const IOERR: i32 = 74;

/// Unreadable or invalid configuration
pub const CONFIG: i32 = 78;
