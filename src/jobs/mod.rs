pub mod completion;
pub mod status;

pub use completion::{CompletionFlow, ProofFile};
pub use status::{JobAction, StatusStyle};
