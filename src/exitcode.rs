//! Process exit codes of the dispatcher

/// Successful termination, help output, or an aborted parse on an unknown option
pub const OK: i32 = 0;

/// No known action was selected
pub const UNKNOWN_ACTION: i32 = 1;

/// Any error raised while parsing or executing the action
pub const FAILURE: i32 = 2;
