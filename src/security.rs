#![forbid(unsafe_code)]

//! Random tokens used while talking to the OAuth provider.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand_core::{OsRng, RngCore};

const STATE_TOKEN_BYTES: usize = 32;

/// Opaque value sent as the `state` parameter of the authorization URL.
pub fn generate_state_token() -> String {
    generate_state_token_with(&mut OsRng)
}

fn generate_state_token_with(rng: &mut impl RngCore) -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingRng(u8);

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_le_bytes(buf)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn state_token_is_url_safe() {
        let token = generate_state_token_with(&mut CountingRng(250));
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn state_tokens_differ_between_calls() {
        assert_ne!(generate_state_token(), generate_state_token());
    }
}
