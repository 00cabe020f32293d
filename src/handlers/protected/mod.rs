// handlers/protected/mod.rs - Protected handlers (identity required)
//
// Every handler here takes a resolved identity: CurrentUser from the
// Authorization header, or StreamUser for EventSource clients that can only
// pass the token in the query string.

pub mod threads;
pub mod whoami;

pub use threads::{thread_access_get, thread_stream_get};
pub use whoami::whoami_get;
