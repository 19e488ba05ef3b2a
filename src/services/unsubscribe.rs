//! Keyed unsubscribe tokens.
//!
//! Every broadcast embeds a per-recipient unsubscribe link carrying
//! `HMAC-SHA256(lowercase(email), secret)` in hex. Verification is stateless:
//! possession of a matching (email, token) pair is the authorization, with no
//! session or expiry involved.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct UnsubscribeSigner {
    secret: Vec<u8>,
}

impl UnsubscribeSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    fn mac_for(&self, email: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(email.to_lowercase().as_bytes());
        mac
    }

    pub fn token_for(&self, email: &str) -> String {
        hex::encode(self.mac_for(email).finalize().into_bytes())
    }

    /// Constant-time verification of a presented token.
    pub fn verify(&self, email: &str, token: &str) -> bool {
        let Ok(presented) = hex::decode(token) else {
            return false;
        };
        self.mac_for(email).verify_slice(&presented).is_ok()
    }

    pub fn unsubscribe_url(&self, app_url: &str, email: &str) -> String {
        format!(
            "{}/unsubscribe?email={}&token={}",
            app_url,
            urlencoding::encode(email),
            self.token_for(email)
        )
    }
}
