//! Selection state machine: the user's column/table/condition choices and the
//! single-table rules that keep them consistent.
//!
//! All selected columns share one `(database, table)` scope. The scope is set by
//! the first added column or by an explicit table choice; choosing a table always
//! wins over the columns picked so far.

mod availability;
mod events;
mod reducer;
mod state;

pub use events::Event;
pub use reducer::apply;
pub use state::{ScopeOrigin, SelectionState};
