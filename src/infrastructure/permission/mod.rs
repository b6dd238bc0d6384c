//! Permission infrastructure module

mod consent;

pub use consent::{ConsentFilePermissions, CONSENT_PROMPT};
