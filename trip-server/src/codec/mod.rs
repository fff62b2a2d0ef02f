//! State codec: compact share tokens and the document export format.

mod document;
mod state;
mod token;

pub use document::{document_file_name, from_document, to_document};
pub use state::TripState;
pub use token::{
    LEGACY_KEY, PRIMARY_KEY, TokenError, decode_any, decode_query, decode_token, encode_token,
    share_query,
};

pub(crate) use token::{compress_encode, decompress_decode};
