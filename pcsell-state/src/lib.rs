//! pcsell State Management
//!
//! Records which remote objects a configuration manages, so later runs
//! can diff against them, address them by ID and delete orphans.
//!
//! - **StateFile**: every managed resource with its remote ID and attributes
//! - **StateBackend**: storage with locking for safe concurrent runs
//! - **LocalBackend**: `pcsell.state.json` plus a `.lock` file next to it
//!
//! ```ignore
//! use pcsell_state::{LocalBackend, StateBackend};
//!
//! let backend = LocalBackend::beside("main.hcl");
//! let lock = backend.acquire_lock("apply").await?;
//! let mut state = backend.read_state().await?.unwrap_or_default();
//! // ... apply effects, then record the resulting states ...
//! state.increment_serial();
//! backend.write_state(&state).await?;
//! backend.release_lock(&lock).await?;
//! ```

pub mod backend;
pub mod backends;
pub mod lock;
pub mod state;

pub use backend::{BackendError, BackendResult, StateBackend};
pub use backends::LocalBackend;
pub use lock::LockInfo;
pub use state::{ResourceState, StateFile};
