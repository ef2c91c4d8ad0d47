//! Type definitions for tripshare storage.

mod ids;
mod invitations;
mod items;
mod memberships;
mod roles;
mod trips;
mod users;

// Re-export all types from submodules
pub use ids::*;
pub use invitations::*;
pub use items::*;
pub use memberships::*;
pub use roles::*;
pub use trips::*;
pub use users::*;
