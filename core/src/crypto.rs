// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Hash and address primitives shared by the codec, scripts and engine

use heapless::String;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::proto::{MultisigRedeemScript, ADDRESS_MAX, MULTISIG_KEYS_MAX};

/// Double SHA-256
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let h = Sha256::digest(data);
    Sha256::digest(h).into()
}

/// RIPEMD160(SHA256(data)), the Bitcoin address hash
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let h = Sha256::digest(data);
    Ripemd160::digest(h).into()
}

/// Fingerprint identifying a multisig signer group: SHA-256 over the pubkey
/// set in received order, followed by `m` and `n` as u32 LE.
///
/// Returns `None` when the group is malformed (`m`/`n` outside 1..=15 or
/// `m > n`); change detection and classification must treat that as an
/// error, not a mismatch.
pub fn multisig_fingerprint(multisig: &MultisigRedeemScript) -> Option<[u8; 32]> {
    let m = multisig.m;
    let n = multisig.n() as u32;

    if m < 1 || m > MULTISIG_KEYS_MAX as u32 || n < 1 || n > MULTISIG_KEYS_MAX as u32 || m > n {
        return None;
    }

    let mut h = Sha256::new();
    for pk in &multisig.pubkeys {
        h.update(pk);
    }
    h.update(m.to_le_bytes());
    h.update(n.to_le_bytes());

    Some(h.finalize().into())
}

/// Position of a compressed pubkey within a multisig group
pub fn multisig_pubkey_index(multisig: &MultisigRedeemScript, pubkey: &[u8; 33]) -> Option<usize> {
    multisig.pubkeys.iter().position(|pk| pk == pubkey)
}

/// base58check-encode a version byte plus 20-byte hash as an address
pub fn address_encode(version: u8, hash: &[u8; 20]) -> String<ADDRESS_MAX> {
    let mut payload = [0u8; 21];
    payload[0] = version;
    payload[1..].copy_from_slice(hash);

    let encoded = bs58::encode(&payload[..]).with_check().into_string();

    let mut s = String::new();
    // a 21-byte payload always fits ADDRESS_MAX
    let _ = s.push_str(&encoded);
    s
}

/// base58check-decode an address into its version byte and 20-byte hash
pub fn address_decode(address: &str) -> Option<(u8, [u8; 20])> {
    let decoded = bs58::decode(address).with_check(None).into_vec().ok()?;

    if decoded.len() != 21 {
        return None;
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&decoded[1..]);

    Some((decoded[0], hash))
}
