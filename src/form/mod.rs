mod actions;
mod error;
mod expansion;
mod reorder;
mod store;

pub use actions::{CommandOutcome, EditCommand};
pub use error::FormError;
pub use expansion::ExpansionState;
pub use reorder::{DragSession, EntryPosition, MoveRequest};
pub use store::AddOutcome;

pub(crate) use store::section_schema;
