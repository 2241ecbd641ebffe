mod session;
mod workflow;

// Public API of the practice subsystem.
pub use crate::error::PracticeError;
pub use session::{PracticeAction, PracticeSession, PracticeSummary};
pub use workflow::{PracticeLoopService, PracticeOrder, PracticeSelection, PracticeStep};
