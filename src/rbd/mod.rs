pub mod status;
pub mod types;

pub use status::{PoolStatusProvider, RbdMirrorStatus};
pub use types::{PoolStatus, PoolStatusSummary};
