//! History seed: whole-list transfer between environments.
//!
//! The seed reuses the v2 token transform (JSON, deflate, URL-safe base64)
//! over the full saved-trip list, without the active pointer.

use tracing::warn;

use super::SavedTrip;
use crate::codec::{self, TokenError};

/// Errors from seed import. Export failures surface as [`TokenError`].
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed did not decode, or decoded to something that is not a
    /// saved-trip list, or every entry failed the shape check.
    #[error("invalid history seed")]
    Invalid,
}

/// Encode the full history list as a seed string.
pub fn encode_seed(trips: &[SavedTrip]) -> Result<String, TokenError> {
    let json = serde_json::to_vec(trips)?;
    Ok(codec::compress_encode(&json)?)
}

/// Decode and validate a seed.
///
/// Each decoded entry must carry at minimum an id, a name, and a token;
/// entries failing that shape check are dropped. A non-empty payload that
/// yields zero valid entries is an invalid seed, not an empty history.
pub fn parse_seed(seed: &str) -> Result<Vec<SavedTrip>, SeedError> {
    let json = codec::decompress_decode(seed).ok_or(SeedError::Invalid)?;
    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(&json).map_err(|_| SeedError::Invalid)?;

    let total = entries.len();
    let trips: Vec<SavedTrip> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<SavedTrip>(entry) {
            Ok(trip) => Some(trip),
            Err(e) => {
                warn!(error = %e, "dropping malformed seed entry");
                None
            }
        })
        .collect();

    if trips.is_empty() && total > 0 {
        return Err(SeedError::Invalid);
    }
    Ok(trips)
}
