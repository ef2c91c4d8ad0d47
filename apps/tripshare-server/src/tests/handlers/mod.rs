//! Handler tests, organized by resource.

mod invitations;
mod items;
mod members;
mod sharing;
mod trips;
