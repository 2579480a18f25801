// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol messages for streamed transaction signing
//!
//! This module provides the message vocabulary exchanged between a host and
//! the signing engine: outbound [`TxRequest`]s asking the host for the next
//! piece of a transaction, and inbound [`TxAck`]s carrying exactly one input,
//! output, previous-transaction output, or previous-transaction header.
//!
//! Messages use a primitive binary encoding to simplify implementation on
//! constrained platforms and with other languages. All integer fields are
//! little-endian; variable-length fields carry explicit length prefixes and
//! optional sections are announced by a leading flags byte. Framing (USB
//! transport, message type dispatch, failure reporting) is the concern of the
//! surrounding message layer, not of this crate.
//!
//! Every variable-length field is bounded: the maximum sizes are exported as
//! constants and enforced by the [`heapless`] capacities of the field types.

#![no_std]

pub use encdec::{DecodeOwned, Encode};

mod helpers;

mod input;
pub use input::{InputScriptType, MultisigRedeemScript, TxInput};

mod output;
pub use output::{OutputAddressType, OutputScriptType, TxBinOutput, TxOutput};

mod meta;
pub use meta::TxMeta;

mod request;
pub use request::{RequestType, TxRequest, TxRequestDetails, TxRequestSerialized};

mod ack;
pub use ack::TxAck;

pub mod prelude;

/// Maximum BIP-32 path depth carried in a message
pub const PATH_MAX: usize = 8;

/// Maximum number of keys in a multisig redeem script
pub const MULTISIG_KEYS_MAX: usize = 15;

/// Maximum DER signature length
pub const SIGNATURE_MAX: usize = 72;

/// Maximum scriptSig length (signed multisig input)
pub const SCRIPT_SIG_MAX: usize = 1650;

/// Maximum scriptPubKey length for a compiled output
pub const SCRIPT_PUBKEY_MAX: usize = 520;

/// Maximum serialized fragment length in a [`TxRequest`]
pub const SERIALIZED_TX_MAX: usize = 2048;

/// Maximum base58check address length
pub const ADDRESS_MAX: usize = 40;

/// Protocol encode / decode errors
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    /// Buffer too short for the encoding at hand
    InvalidLength,
    /// Field value outside its wire domain
    InvalidEncoding,
}

impl From<encdec::Error> for Error {
    fn from(_: encdec::Error) -> Self {
        Error::InvalidLength
    }
}
