//! PumpPortal Adapter
//!
//! Implementation of the LaunchpadPort for pump.fun token launches.
//!
//! # Endpoints
//!
//! - `POST https://pump.fun/api/ipfs` - multipart metadata + logo upload,
//!   returns `{ metadata: { name, symbol }, metadataUri }`
//! - `POST https://pumpportal.fun/api/trade-local` - JSON trade request,
//!   returns a raw serialized unsigned `VersionedTransaction` on HTTP 200
//!
//! The caller deserializes, signs and submits the transaction through its
//! own RPC node; PumpPortal never sees a private key.

mod client;
mod types;

pub use client::{PumpPortalClient, PumpPortalConfig};
pub use types::{MetadataFields, MetadataResponse};
