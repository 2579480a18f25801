// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Script construction: locking scripts for compiled outputs and unlocking
//! scripts for signed inputs

use heapless::Vec;

use crate::coins::CoinParams;
use crate::crypto;
use crate::proto::{MultisigRedeemScript, SCRIPT_PUBKEY_MAX, SCRIPT_SIG_MAX};

const OP_0: u8 = 0x00;
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_DUP: u8 = 0x76;
const OP_EQUAL: u8 = 0x87;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_HASH160: u8 = 0xa9;
const OP_CHECKSIG: u8 = 0xac;
const OP_CHECKMULTISIG: u8 = 0xae;

/// Sighash byte appended to each in-script signature
const SIGHASH_ALL: u8 = 0x01;

/// Emit a data push opcode for `len` bytes
fn op_push<const N: usize>(len: usize, out: &mut Vec<u8, N>) -> Option<()> {
    if len < OP_PUSHDATA1 as usize {
        out.push(len as u8).ok()?;
    } else if len < 0x100 {
        out.push(OP_PUSHDATA1).ok()?;
        out.push(len as u8).ok()?;
    } else {
        out.push(OP_PUSHDATA2).ok()?;
        out.extend_from_slice(&(len as u16).to_le_bytes()).ok()?;
    }
    Some(())
}

fn push_data<const N: usize>(data: &[u8], out: &mut Vec<u8, N>) -> Option<()> {
    op_push(data.len(), out)?;
    out.extend_from_slice(data).ok()
}

/// Build the locking script for an address hash, dispatching P2PKH / P2SH on
/// the coin's version bytes. Unknown version bytes yield `None`.
pub fn locking_script(
    coin: &CoinParams,
    version: u8,
    hash: &[u8; 20],
) -> Option<Vec<u8, SCRIPT_PUBKEY_MAX>> {
    let mut out = Vec::new();

    if version == coin.address_type {
        // OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG
        out.push(OP_DUP).ok()?;
        out.push(OP_HASH160).ok()?;
        push_data(hash, &mut out)?;
        out.push(OP_EQUALVERIFY).ok()?;
        out.push(OP_CHECKSIG).ok()?;
    } else if version == coin.address_type_p2sh {
        // OP_HASH160 <20> OP_EQUAL
        out.push(OP_HASH160).ok()?;
        push_data(hash, &mut out)?;
        out.push(OP_EQUAL).ok()?;
    } else {
        return None;
    }

    Some(out)
}

/// Compile a multisig redeem script:
/// `OP_m <pk1> .. <pkn> OP_n OP_CHECKMULTISIG`
pub fn compile_multisig(multisig: &MultisigRedeemScript) -> Option<Vec<u8, SCRIPT_PUBKEY_MAX>> {
    let m = multisig.m as usize;
    let n = multisig.n();

    if m < 1 || m > 15 || n < 1 || n > 15 || m > n {
        return None;
    }

    let mut out = Vec::new();

    out.push(0x50 + m as u8).ok()?;
    for pk in &multisig.pubkeys {
        push_data(pk, &mut out)?;
    }
    out.push(0x50 + n as u8).ok()?;
    out.push(OP_CHECKMULTISIG).ok()?;

    Some(out)
}

/// Build the final P2PKH scriptSig: `<sig ‖ SIGHASH_ALL> <pubkey>`
pub fn serialize_p2pkh_script_sig(
    signature: &[u8],
    pubkey: &[u8; 33],
) -> Option<Vec<u8, SCRIPT_SIG_MAX>> {
    let mut out = Vec::new();

    op_push(signature.len() + 1, &mut out)?;
    out.extend_from_slice(signature).ok()?;
    out.push(SIGHASH_ALL).ok()?;

    push_data(pubkey, &mut out)?;

    Some(out)
}

/// Build the final multisig scriptSig:
/// `OP_0 <sig1 ‖ SIGHASH_ALL> .. <redeem script>`
///
/// The leading OP_0 satisfies OP_CHECKMULTISIG's extra stack pop. Only
/// non-empty signature slots are pushed.
pub fn serialize_multisig_script_sig(
    multisig: &MultisigRedeemScript,
) -> Option<Vec<u8, SCRIPT_SIG_MAX>> {
    let mut out = Vec::new();

    out.push(OP_0).ok()?;

    for sig in &multisig.signatures {
        if sig.is_empty() {
            continue;
        }
        op_push(sig.len() + 1, &mut out)?;
        out.extend_from_slice(sig).ok()?;
        out.push(SIGHASH_ALL).ok()?;
    }

    let redeem = compile_multisig(multisig)?;
    push_data(&redeem, &mut out)?;

    Some(out)
}

/// P2SH locking script for a multisig group
pub fn multisig_locking_script(
    coin: &CoinParams,
    multisig: &MultisigRedeemScript,
) -> Option<(Vec<u8, SCRIPT_PUBKEY_MAX>, [u8; 20])> {
    let redeem = compile_multisig(multisig)?;
    let hash = crypto::hash160(&redeem);

    let script = locking_script(coin, coin.address_type_p2sh, &hash)?;

    Some((script, hash))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coins::BITCOIN;

    #[test]
    fn p2pkh_script_shape() {
        let hash = [0x11u8; 20];
        let s = locking_script(&BITCOIN, 0, &hash).unwrap();

        assert_eq!(s.len(), 25);
        assert_eq!(&s[..3], &[OP_DUP, OP_HASH160, 20]);
        assert_eq!(&s[3..23], &hash);
        assert_eq!(&s[23..], &[OP_EQUALVERIFY, OP_CHECKSIG]);
    }

    #[test]
    fn p2sh_script_shape() {
        let hash = [0x22u8; 20];
        let s = locking_script(&BITCOIN, 5, &hash).unwrap();

        assert_eq!(s.len(), 23);
        assert_eq!(&s[..2], &[OP_HASH160, 20]);
        assert_eq!(&s[22..], &[OP_EQUAL]);
    }

    #[test]
    fn unknown_version_rejected() {
        assert!(locking_script(&BITCOIN, 42, &[0u8; 20]).is_none());
    }

    #[test]
    fn multisig_redeem_shape() {
        let ms = MultisigRedeemScript::new(2, &[[0x02; 33], [0x03; 33], [0x04; 33]]).unwrap();
        let s = compile_multisig(&ms).unwrap();

        assert_eq!(s.len(), 1 + 3 * 34 + 2);
        assert_eq!(s[0], 0x52); // OP_2
        assert_eq!(s[s.len() - 2], 0x53); // OP_3
        assert_eq!(s[s.len() - 1], OP_CHECKMULTISIG);
    }

    #[test]
    fn multisig_rejects_bad_threshold() {
        let ms = MultisigRedeemScript::new(4, &[[0x02; 33], [0x03; 33]]).unwrap();
        assert!(compile_multisig(&ms).is_none());
    }

    #[test]
    fn p2pkh_script_sig_shape() {
        let sig = [0x30u8; 71];
        let pk = [0x02u8; 33];

        let s = serialize_p2pkh_script_sig(&sig, &pk).unwrap();

        assert_eq!(s[0], 72); // sig + sighash byte
        assert_eq!(s[72], SIGHASH_ALL);
        assert_eq!(s[73], 33);
        assert_eq!(s.len(), 1 + 72 + 1 + 33);
    }

    #[test]
    fn multisig_script_sig_skips_empty_slots() {
        let mut ms = MultisigRedeemScript::new(2, &[[0x02; 33], [0x03; 33], [0x04; 33]]).unwrap();
        ms.set_signature(1, &[0x30; 70]).unwrap();

        let s = serialize_multisig_script_sig(&ms).unwrap();

        assert_eq!(s[0], OP_0);
        assert_eq!(s[1], 71); // one present signature
        assert_eq!(s[72], SIGHASH_ALL);
        // redeem script push follows immediately
        let redeem = compile_multisig(&ms).unwrap();
        assert_eq!(s[73] as usize, redeem.len());
        assert_eq!(&s[74..], &redeem[..]);
    }

    #[test]
    fn push_boundaries() {
        let mut out: Vec<u8, 600> = Vec::new();
        op_push(0x4b, &mut out).unwrap();
        assert_eq!(&out[..], &[0x4b]);

        out.clear();
        op_push(0x4c, &mut out).unwrap();
        assert_eq!(&out[..], &[OP_PUSHDATA1, 0x4c]);

        out.clear();
        op_push(0x100, &mut out).unwrap();
        assert_eq!(&out[..], &[OP_PUSHDATA2, 0x00, 0x01]);
    }
}
