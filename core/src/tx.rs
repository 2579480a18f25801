// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Streaming transaction codec
//!
//! [`TxSerializer`] turns a sequence of inputs and outputs into the
//! canonical transaction byte layout without ever holding the whole
//! transaction: hash-mode calls feed a running SHA-256, emit-mode calls
//! write one fragment into a caller buffer. The serializer owns the cursor
//! (header before the first input, output-count varint before the first
//! output, footer after the last output) so callers simply stream pieces in
//! order.
//!
//! The same module defines the Phase-1 / Phase-2 checksum records and
//! output compilation from host-described outputs to wire bytes.

use heapless::Vec;
use sha2::{Digest, Sha256};

use crate::coins::CoinParams;
use crate::crypto;
use crate::engine::Driver;
use crate::hd::HdNode;
use crate::proto::{
    OutputAddressType, OutputScriptType, TxBinOutput, TxInput, TxOutput, SERIALIZED_TX_MAX,
};
use crate::script;
use secp256k1::{All, Secp256k1};

/// Transaction version written for every signed transaction
pub const VERSION: u32 = 1;

/// Lock time written for every signed transaction
pub const LOCK_TIME: u32 = 0;

/// Upper bound for one serialized input record (header + outpoint + worst
/// case multisig scriptSig + sequence)
const INPUT_RECORD_MAX: usize = SERIALIZED_TX_MAX;

/// Codec errors; callers map these onto protocol failures
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CodecError {
    /// More pieces than declared, or outputs before all inputs
    OutOfOrder,
    /// Fragment exceeds its bounded buffer
    Overflow,
}

/// Streaming serializer for one transaction
pub struct TxSerializer {
    inputs_len: u32,
    outputs_len: u32,
    version: u32,
    lock_time: u32,

    /// Append the u32 SIGHASH_ALL suffix after the footer (signing-digest
    /// construction)
    add_hash_type: bool,

    have_inputs: u32,
    have_outputs: u32,
    size: usize,

    hasher: Sha256,
}

impl TxSerializer {
    pub fn new(
        inputs_len: u32,
        outputs_len: u32,
        version: u32,
        lock_time: u32,
        add_hash_type: bool,
    ) -> Self {
        Self {
            inputs_len,
            outputs_len,
            version,
            lock_time,
            add_hash_type,
            have_inputs: 0,
            have_outputs: 0,
            size: 0,
            hasher: Sha256::new(),
        }
    }

    pub fn inputs_len(&self) -> u32 {
        self.inputs_len
    }

    pub fn outputs_len(&self) -> u32 {
        self.outputs_len
    }

    /// Serialized bytes streamed so far
    pub fn size(&self) -> usize {
        self.size
    }

    fn render_varint<const N: usize>(v: u32, out: &mut Vec<u8, N>) -> Result<(), CodecError> {
        if v < 253 {
            out.push(v as u8).map_err(|_| CodecError::Overflow)?;
        } else if v < 0x1_0000 {
            out.push(0xfd).map_err(|_| CodecError::Overflow)?;
            out.extend_from_slice(&(v as u16).to_le_bytes())
                .map_err(|_| CodecError::Overflow)?;
        } else {
            out.push(0xfe).map_err(|_| CodecError::Overflow)?;
            out.extend_from_slice(&v.to_le_bytes())
                .map_err(|_| CodecError::Overflow)?;
        }
        Ok(())
    }

    /// Render the next input record, including the transaction header when
    /// this is the first one. Advances the input cursor.
    fn render_input<const N: usize>(
        &mut self,
        input: &TxInput,
        out: &mut Vec<u8, N>,
    ) -> Result<(), CodecError> {
        if self.have_inputs >= self.inputs_len {
            return Err(CodecError::OutOfOrder);
        }

        if self.have_inputs == 0 {
            out.extend_from_slice(&self.version.to_le_bytes())
                .map_err(|_| CodecError::Overflow)?;
            Self::render_varint(self.inputs_len, out)?;
        }

        // prev_hash is carried in display order, the wire wants it reversed
        for b in input.prev_hash.iter().rev() {
            out.push(*b).map_err(|_| CodecError::Overflow)?;
        }
        out.extend_from_slice(&input.prev_index.to_le_bytes())
            .map_err(|_| CodecError::Overflow)?;

        Self::render_varint(input.script_sig.len() as u32, out)?;
        out.extend_from_slice(&input.script_sig)
            .map_err(|_| CodecError::Overflow)?;

        out.extend_from_slice(&input.sequence.to_le_bytes())
            .map_err(|_| CodecError::Overflow)?;

        self.have_inputs += 1;
        self.size += out.len();

        Ok(())
    }

    /// Render the next output record, including the output-count varint
    /// when this is the first one and the footer when it is the last.
    /// Advances the output cursor.
    fn render_bin_output<const N: usize>(
        &mut self,
        output: &TxBinOutput,
        out: &mut Vec<u8, N>,
    ) -> Result<(), CodecError> {
        if self.have_inputs < self.inputs_len {
            return Err(CodecError::OutOfOrder);
        }
        if self.have_outputs >= self.outputs_len {
            return Err(CodecError::OutOfOrder);
        }

        if self.have_outputs == 0 {
            Self::render_varint(self.outputs_len, out)?;
        }

        out.extend_from_slice(&output.amount.to_le_bytes())
            .map_err(|_| CodecError::Overflow)?;
        Self::render_varint(output.script_pubkey.len() as u32, out)?;
        out.extend_from_slice(&output.script_pubkey)
            .map_err(|_| CodecError::Overflow)?;

        self.have_outputs += 1;

        if self.have_outputs == self.outputs_len {
            out.extend_from_slice(&self.lock_time.to_le_bytes())
                .map_err(|_| CodecError::Overflow)?;
            if self.add_hash_type {
                out.extend_from_slice(&1u32.to_le_bytes())
                    .map_err(|_| CodecError::Overflow)?;
            }
        }

        self.size += out.len();

        Ok(())
    }

    /// Hash-mode input: feed the canonical record into the running hash
    pub fn hash_input(&mut self, input: &TxInput) -> Result<(), CodecError> {
        let mut buf: Vec<u8, INPUT_RECORD_MAX> = Vec::new();
        self.render_input(input, &mut buf)?;
        self.hasher.update(&buf[..]);
        Ok(())
    }

    /// Hash-mode output
    pub fn hash_bin_output(&mut self, output: &TxBinOutput) -> Result<(), CodecError> {
        let mut buf: Vec<u8, INPUT_RECORD_MAX> = Vec::new();
        self.render_bin_output(output, &mut buf)?;
        self.hasher.update(&buf[..]);
        Ok(())
    }

    /// Emit-mode input: write the fragment into `out`
    pub fn serialize_input(
        &mut self,
        input: &TxInput,
        out: &mut Vec<u8, SERIALIZED_TX_MAX>,
    ) -> Result<usize, CodecError> {
        out.clear();
        self.render_input(input, out)?;
        Ok(out.len())
    }

    /// Emit-mode output
    pub fn serialize_bin_output(
        &mut self,
        output: &TxBinOutput,
        out: &mut Vec<u8, SERIALIZED_TX_MAX>,
    ) -> Result<usize, CodecError> {
        out.clear();
        self.render_bin_output(output, out)?;
        Ok(out.len())
    }

    /// Double SHA-256 over everything hashed so far; `reverse` yields txid
    /// display order
    pub fn finalize(self, reverse: bool) -> [u8; 32] {
        let h = self.hasher.finalize();
        let mut hash: [u8; 32] = Sha256::digest(h).into();

        if reverse {
            hash.reverse();
        }

        hash
    }
}

/// Estimated transaction size in kilobytes, rounded up, for the fee
/// threshold check
pub fn estimate_size_kb(inputs_count: u32, outputs_count: u32) -> u32 {
    let size = 10 + 148 * inputs_count + 34 * outputs_count;
    (size + 999) / 1000
}

/// Seed the anti-tamper checksum with the session shape. Phase 1 and
/// Phase 2 both start from exactly this state.
pub fn checksum_seed(inputs_count: u32, outputs_count: u32) -> Sha256 {
    let mut h = Sha256::new();
    h.update(inputs_count.to_le_bytes());
    h.update(outputs_count.to_le_bytes());
    h.update(VERSION.to_le_bytes());
    h.update(LOCK_TIME.to_le_bytes());
    h
}

/// Fold one input, in received form, into the checksum. Every host-visible
/// field is covered with length prefixes so no two distinct inputs collide.
pub fn checksum_input(h: &mut Sha256, input: &TxInput) {
    h.update((input.address_n.len() as u32).to_le_bytes());
    for v in &input.address_n {
        h.update(v.to_le_bytes());
    }

    h.update(input.prev_hash);
    h.update(input.prev_index.to_le_bytes());
    h.update([input.script_type as u8]);

    match &input.multisig {
        Some(ms) => {
            h.update([1u8]);
            h.update(ms.m.to_le_bytes());
            h.update((ms.n() as u32).to_le_bytes());
            for pk in &ms.pubkeys {
                h.update(pk);
            }
            h.update((ms.signatures.len() as u32).to_le_bytes());
            for sig in &ms.signatures {
                h.update((sig.len() as u32).to_le_bytes());
                h.update(&sig[..]);
            }
        }
        None => h.update([0u8]),
    }

    h.update((input.script_sig.len() as u32).to_le_bytes());
    h.update(&input.script_sig[..]);

    h.update(input.sequence.to_le_bytes());
}

/// Fold one compiled output into the checksum
pub fn checksum_bin_output(h: &mut Sha256, output: &TxBinOutput) {
    h.update(output.amount.to_le_bytes());
    h.update((output.script_pubkey.len() as u32).to_le_bytes());
    h.update(&output.script_pubkey[..]);
}

/// Output compilation failures
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CompileError {
    /// User rejected the output confirmation
    Cancelled,
    /// `address_type` present but inconsistent with the output fields
    AddressType,
    /// Bad address, unknown version byte, missing fields, or a failed
    /// derivation
    Invalid,
}

/// Compile a host-described output into its wire form, confirming displayed
/// outputs with the user when `needs_confirm` is set.
pub fn compile_output<DRV: Driver>(
    coin: &CoinParams,
    root: &HdNode,
    secp: &Secp256k1<All>,
    output: &TxOutput,
    needs_confirm: bool,
    drv: &mut DRV,
) -> Result<TxBinOutput, CompileError> {
    // Host-declared destination class must be consistent before anything
    // else is trusted
    if let Some(t) = output.address_type {
        let valid = match t {
            OutputAddressType::Spend => output.address.is_some(),
            OutputAddressType::Transfer | OutputAddressType::Change => {
                !output.address_n.is_empty()
            }
        };
        if !valid {
            return Err(CompileError::AddressType);
        }
    }

    let (script, display) = match output.script_type {
        OutputScriptType::PayToAddress => {
            let (version, hash, display) = match (&output.address, output.address_n.is_empty()) {
                (Some(addr), _) => {
                    let (version, hash) =
                        crypto::address_decode(addr.as_str()).ok_or(CompileError::Invalid)?;
                    if version != coin.address_type {
                        return Err(CompileError::Invalid);
                    }
                    (version, hash, addr.clone())
                }
                (None, false) => {
                    let node = root
                        .derive(secp, &output.address_n)
                        .ok_or(CompileError::Invalid)?;
                    let hash = crypto::hash160(node.public_key());
                    (
                        coin.address_type,
                        hash,
                        crypto::address_encode(coin.address_type, &hash),
                    )
                }
                (None, true) => return Err(CompileError::Invalid),
            };

            let script =
                script::locking_script(coin, version, &hash).ok_or(CompileError::Invalid)?;
            (script, display)
        }
        OutputScriptType::PayToScriptHash => {
            let addr = output.address.as_ref().ok_or(CompileError::Invalid)?;
            let (version, hash) =
                crypto::address_decode(addr.as_str()).ok_or(CompileError::Invalid)?;
            if version != coin.address_type_p2sh {
                return Err(CompileError::Invalid);
            }

            let script =
                script::locking_script(coin, version, &hash).ok_or(CompileError::Invalid)?;
            (script, addr.clone())
        }
        OutputScriptType::PayToMultisig => {
            let ms = output.multisig.as_ref().ok_or(CompileError::Invalid)?;

            let (script, hash) =
                script::multisig_locking_script(coin, ms).ok_or(CompileError::Invalid)?;
            (script, crypto::address_encode(coin.address_type_p2sh, &hash))
        }
    };

    if needs_confirm {
        let amount = coin.format_amount(output.amount);
        if !drv.confirm_output(amount.as_str(), display.as_str()) {
            return Err(CompileError::Cancelled);
        }
    }

    Ok(TxBinOutput {
        amount: output.amount,
        script_pubkey: script,
    })
}
