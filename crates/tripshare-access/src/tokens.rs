//! Unguessable codes for invitations and public share links.

use rand::RngCore;

/// Random bytes behind an invitation code.
pub const INVITATION_CODE_BYTES: usize = 16;
/// Random bytes behind a public share token.
pub const SHARE_TOKEN_BYTES: usize = 32;

pub fn invitation_code() -> String {
    random_hex(INVITATION_CODE_BYTES)
}

pub fn share_token() -> String {
    random_hex(SHARE_TOKEN_BYTES)
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
