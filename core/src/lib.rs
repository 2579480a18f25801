// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Streamed Bitcoin-style transaction signing core
//!
//! This provides a common [Engine][engine] supporting interactive signing of
//! transactions too large for device memory, for execution on hardware
//! wallets.
//!
//! The engine holds at most one input or output at a time. It pulls each
//! piece from an untrusted host via [`TxRequest`][proto::TxRequest] /
//! [`TxAck`][proto::TxAck] exchanges, validates it, obtains user
//! confirmation through the platform [`Driver`][engine::Driver], and emits
//! signed input scripts and serialized output bytes piece by piece. See
//! [streamsign_proto] for message types and wire encodings.
//!
//! ## Executing a transaction
//!
//! A signing session runs two passes over the transaction:
//!
//! 1. Start the session with [`Engine::start`][engine::Engine::start],
//!    declaring the input / output counts, coin and signing root; the engine
//!    replies with its first request.
//! 2. **Phase 1 — verification.** For each input the engine requests the
//!    input, then the referenced previous transaction (header, every input,
//!    every output) and re-computes its id to prove the claimed funding
//!    amount. Each output is then requested, classified as change or spend,
//!    and spends are confirmed on the device. The phase ends with the fee
//!    check and the final transaction confirmation.
//! 3. **Phase 2 — signing.** For each input the engine re-requests every
//!    input and output, rebuilding the signing digest with the target
//!    input's scriptPubKey in place, and answers with a DER signature and
//!    the serialized signed input. Finally every output is requested once
//!    more and returned in serialized form, followed by
//!    [`TxFinished`][proto::RequestType::TxFinished].
//!
//! A running checksum over everything the user approved in Phase 1 is
//! rebuilt from scratch in Phase 2 and compared before any signature leaves
//! the device, so a host that changes its answers between the passes aborts
//! the session rather than obtaining a signature.

#![cfg_attr(not(feature = "std"), no_std)]

pub use streamsign_proto as proto;

pub mod coins;

pub mod crypto;

pub mod engine;

pub mod hd;

pub mod script;

pub mod tx;
