//! File transformation engine.

mod collision;
mod helpers;
mod lock;
mod pass;
mod snapshot;
mod transform;
mod write;

pub use collision::{CollisionPolicy, next_candidate, resolve_output_name};
pub use helpers::{io_error_with_help, io_error_with_help_io, io_hint};
pub use lock::{SourceLock, try_lock_source};
pub use pass::{FileFailure, PassReport, run_pass};
pub use snapshot::{DirectorySnapshot, SuffixMask};
pub use transform::{CHUNK_SIZE, transform, transform_with_chunk_size, xor_in_place};
