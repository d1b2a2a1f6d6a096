use data_encoding::BASE32_NOPAD;
use keystone_models::ConfirmationToken;
use rand::RngCore;

const TOKEN_BYTES: usize = 20;

/// Fresh random confirmation token (160 bits, base32).
pub fn generate_token() -> ConfirmationToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    ConfirmationToken::from(BASE32_NOPAD.encode(&bytes))
}

/// Compare tokens without short-circuiting on the first differing byte.
pub fn tokens_match(expected: &ConfirmationToken, presented: &ConfirmationToken) -> bool {
    let a = expected.as_str().as_bytes();
    let b = presented.as_str().as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
