// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction input messages

use encdec::{DecodeOwned, Encode};
use heapless::Vec;
use num_enum::TryFromPrimitive;

use crate::{helpers::*, Error, MULTISIG_KEYS_MAX, PATH_MAX, SCRIPT_SIG_MAX, SIGNATURE_MAX};

/// How an input is spent, and hence how its scriptSig is built
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum InputScriptType {
    /// Single-key P2PKH spend
    SpendAddress = 0x00,
    /// m-of-n P2SH multisig spend
    SpendMultisig = 0x01,
}

impl Encode for InputScriptType {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        Ok(1)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;
        wr_u8(buff, &mut index, *self as u8)?;
        Ok(index)
    }
}

impl DecodeOwned for InputScriptType {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;
        let v = rd_u8(buff, &mut index)?;
        let s = Self::try_from(v).map_err(|_| Error::InvalidEncoding)?;
        Ok((s, index))
    }
}

/// Multisig group description: the ordered pubkey set, the threshold `m`,
/// and (once signing is under way) per-key DER signatures
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MultisigRedeemScript {
    /// Compressed public keys, in redeem-script order
    pub pubkeys: Vec<[u8; 33], MULTISIG_KEYS_MAX>,

    /// DER signatures, indexed like `pubkeys`; empty entries are unsigned
    pub signatures: Vec<Vec<u8, SIGNATURE_MAX>, MULTISIG_KEYS_MAX>,

    /// Signature threshold
    pub m: u32,
}

impl MultisigRedeemScript {
    /// Build a multisig description from a threshold and key set
    pub fn new(m: u32, pubkeys: &[[u8; 33]]) -> Result<Self, Error> {
        Ok(Self {
            pubkeys: Vec::from_slice(pubkeys).map_err(|_| Error::InvalidLength)?,
            signatures: Vec::new(),
            m,
        })
    }

    /// Number of keys in the group
    pub fn n(&self) -> usize {
        self.pubkeys.len()
    }

    /// Store a signature at the given key index, growing the signature list
    /// with empty entries as required
    pub fn set_signature(&mut self, index: usize, sig: &[u8]) -> Result<(), Error> {
        if index >= self.pubkeys.len() {
            return Err(Error::InvalidEncoding);
        }

        while self.signatures.len() <= index {
            self.signatures.push(Vec::new()).map_err(|_| Error::InvalidLength)?;
        }

        self.signatures[index] = Vec::from_slice(sig).map_err(|_| Error::InvalidLength)?;

        Ok(())
    }
}

impl Encode for MultisigRedeemScript {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        let sigs: usize = self.signatures.iter().map(|s| 1 + s.len()).sum();
        Ok(4 + 1 + 33 * self.pubkeys.len() + 1 + sigs)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        wr_u32(buff, &mut index, self.m)?;

        wr_u8(buff, &mut index, self.pubkeys.len() as u8)?;
        for pk in &self.pubkeys {
            wr(buff, &mut index, pk)?;
        }

        wr_u8(buff, &mut index, self.signatures.len() as u8)?;
        for sig in &self.signatures {
            wr_u8(buff, &mut index, sig.len() as u8)?;
            wr(buff, &mut index, sig)?;
        }

        Ok(index)
    }
}

impl DecodeOwned for MultisigRedeemScript {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let m = rd_u32(buff, &mut index)?;

        let n = rd_u8(buff, &mut index)? as usize;
        if n > MULTISIG_KEYS_MAX {
            return Err(Error::InvalidEncoding);
        }
        let mut pubkeys = Vec::new();
        for _ in 0..n {
            let pk: [u8; 33] = rd_arr(buff, &mut index)?;
            pubkeys.push(pk).map_err(|_| Error::InvalidEncoding)?;
        }

        let s = rd_u8(buff, &mut index)? as usize;
        if s > MULTISIG_KEYS_MAX {
            return Err(Error::InvalidEncoding);
        }
        let mut signatures = Vec::new();
        for _ in 0..s {
            let l = rd_u8(buff, &mut index)? as usize;
            let sig = rd_vec::<SIGNATURE_MAX>(buff, &mut index, l)?;
            signatures.push(sig).map_err(|_| Error::InvalidEncoding)?;
        }

        Ok((
            Self {
                pubkeys,
                signatures,
                m,
            },
            index,
        ))
    }
}

/// One transaction input, as supplied by the host
///
/// The same message shape carries both inputs of the transaction being
/// signed (with `address_n` naming the signing key) and inputs of a
/// previous transaction being re-hashed (with `script_sig` holding the raw
/// scriptSig bytes of that transaction).
#[derive(Clone, PartialEq, Debug)]
pub struct TxInput {
    /// BIP-32 derivation path of the key that owns this input
    pub address_n: Vec<u32, PATH_MAX>,

    /// Referenced transaction id, display (big-endian) order
    pub prev_hash: [u8; 32],

    /// Output index within the referenced transaction
    pub prev_index: u32,

    /// Spend variant
    pub script_type: InputScriptType,

    /// Multisig group, required for [`InputScriptType::SpendMultisig`]
    pub multisig: Option<MultisigRedeemScript>,

    /// scriptSig bytes; host-supplied for previous-transaction inputs,
    /// engine-written for signed inputs
    pub script_sig: Vec<u8, SCRIPT_SIG_MAX>,

    /// Sequence number
    pub sequence: u32,
}

impl Default for TxInput {
    fn default() -> Self {
        Self {
            address_n: Vec::new(),
            prev_hash: [0u8; 32],
            prev_index: 0,
            script_type: InputScriptType::SpendAddress,
            multisig: None,
            script_sig: Vec::new(),
            sequence: 0xFFFF_FFFF,
        }
    }
}

const INPUT_FLAG_MULTISIG: u8 = 1 << 0;

impl Encode for TxInput {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        let mut n = 1 + 1 + 4 * self.address_n.len() + 32 + 4 + 1 + 4 + 2 + self.script_sig.len();
        if let Some(ms) = &self.multisig {
            n += ms.encode_len()?;
        }
        Ok(n)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        let mut flags = 0u8;
        if self.multisig.is_some() {
            flags |= INPUT_FLAG_MULTISIG;
        }
        wr_u8(buff, &mut index, flags)?;

        wr_u8(buff, &mut index, self.address_n.len() as u8)?;
        for v in &self.address_n {
            wr_u32(buff, &mut index, *v)?;
        }

        wr(buff, &mut index, &self.prev_hash)?;
        wr_u32(buff, &mut index, self.prev_index)?;

        index += self.script_type.encode(&mut buff[index..])?;

        wr_u32(buff, &mut index, self.sequence)?;

        wr_u16(buff, &mut index, self.script_sig.len() as u16)?;
        wr(buff, &mut index, &self.script_sig)?;

        if let Some(ms) = &self.multisig {
            index += ms.encode(&mut buff[index..])?;
        }

        Ok(index)
    }
}

impl DecodeOwned for TxInput {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let flags = rd_u8(buff, &mut index)?;

        let depth = rd_u8(buff, &mut index)? as usize;
        if depth > PATH_MAX {
            return Err(Error::InvalidEncoding);
        }
        let mut address_n = Vec::new();
        for _ in 0..depth {
            let v = rd_u32(buff, &mut index)?;
            address_n.push(v).map_err(|_| Error::InvalidEncoding)?;
        }

        let prev_hash: [u8; 32] = rd_arr(buff, &mut index)?;
        let prev_index = rd_u32(buff, &mut index)?;

        let (script_type, n) = InputScriptType::decode_owned(&buff[index..])?;
        index += n;

        let sequence = rd_u32(buff, &mut index)?;

        let l = rd_u16(buff, &mut index)? as usize;
        let script_sig = rd_vec::<SCRIPT_SIG_MAX>(buff, &mut index, l)?;

        let multisig = match flags & INPUT_FLAG_MULTISIG != 0 {
            true => {
                let (ms, n) = MultisigRedeemScript::decode_owned(&buff[index..])?;
                index += n;
                Some(ms)
            }
            false => None,
        };

        Ok((
            Self {
                address_n,
                prev_hash,
                prev_index,
                script_type,
                multisig,
                script_sig,
                sequence,
            },
            index,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::encode_decode;

    #[test]
    fn encode_decode_input() {
        let mut input = TxInput {
            prev_hash: [0xa5; 32],
            prev_index: 3,
            sequence: 0xFFFF_FFFF,
            ..Default::default()
        };
        input.address_n.extend_from_slice(&[0x8000_002c, 0, 7]).unwrap();

        let mut buff = [0u8; 256];
        encode_decode(&mut buff, &input);
    }

    #[test]
    fn encode_decode_multisig_input() {
        let ms = MultisigRedeemScript::new(2, &[[0x02; 33], [0x03; 33], [0x04; 33]]).unwrap();

        let input = TxInput {
            script_type: InputScriptType::SpendMultisig,
            multisig: Some(ms),
            ..Default::default()
        };

        let mut buff = [0u8; 512];
        encode_decode(&mut buff, &input);
    }

    #[test]
    fn reject_oversize_path() {
        let mut buff = [0u8; 64];
        buff[1] = PATH_MAX as u8 + 1;

        assert_eq!(
            TxInput::decode_owned(&buff),
            Err(Error::InvalidEncoding),
        );
    }
}
