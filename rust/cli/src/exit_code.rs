//! Exit codes returned by [`run`](crate::run).

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Any error: bad arguments, bad configuration, I/O or engine failure.
pub const ERROR: i32 = 2;

/// The session was cut short by the user.
pub const INTERRUPTED: i32 = 130;
