mod dataset;
mod ids;
mod inventory;
mod user;

pub use dataset::Dataset;
pub use ids::{RecordId, UserId};
pub use inventory::{ApparelSize, InventoryRecord, NewRecord, RecordPatch, UnknownSize};
pub use user::{Role, UnknownRole, UserAccount};
