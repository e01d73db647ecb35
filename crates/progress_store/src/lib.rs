//! File-backed durable store for learner progress.
//!
//! One JSON document under a dot-directory holds all keys in a versioned
//! envelope. Reads degrade to an empty store on any defect (the engine
//! treats that as "no prior progress"); writes rewrite the whole document.

mod error;
mod paths;
mod store;

pub use error::ProgressStoreError;
pub use paths::{progress_file, progress_root};
pub use store::FileProgressStore;
