// models/src/lib.rs

pub mod errors;
pub mod hostel;

pub use errors::{ErrorKind, HostelError, HostelResult};
pub use hostel::*;
