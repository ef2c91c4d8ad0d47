//! HTTP handlers. Each one extracts the caller, delegates to the access service and
//! maps the result to JSON.

pub mod invitations;
pub mod items;
pub mod members;
pub mod sharing;
pub mod trips;

use std::str::FromStr;

use tripshare_access::AccessError;
use tripshare_storage::MemberRole;

pub(crate) fn parse_role(raw: &str) -> Result<MemberRole, AccessError> {
    MemberRole::from_str(raw).map_err(|e| AccessError::InvalidArgument(e.to_string()))
}
