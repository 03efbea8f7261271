mod session;

pub use session::{SessionMachine, SessionState};
