//! Merchant directory.
//!
//! Fetches the merchants for the current session and decodes them into
//! [`Merchant`] records. Decode failures are classified into a
//! [`DecodeFailure`] and reported with the raw decoder message in `details`.

mod client;
mod decode;
mod types;

pub use client::{AccessTokenProvider, MerchantDirectoryClient, MERCHANTS_PATH};
pub use decode::{
    decode_json, decoding_error_response, json_error_response, unknown_decoding_error_response,
    DecodeFailure,
};
pub use types::Merchant;
