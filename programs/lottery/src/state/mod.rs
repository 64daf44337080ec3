pub mod clock_gate;
pub mod entry_ledger;
pub mod lottery;
pub mod request_tracker;

pub use clock_gate::*;
pub use entry_ledger::*;
pub use lottery::*;
pub use request_tracker::*;
