// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction output messages

use encdec::{DecodeOwned, Encode};
use heapless::{String, Vec};
use num_enum::TryFromPrimitive;

use crate::{helpers::*, Error, MultisigRedeemScript, ADDRESS_MAX, PATH_MAX, SCRIPT_PUBKEY_MAX};

/// scriptPubKey template for an output
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum OutputScriptType {
    /// P2PKH to a base58check address or a derived key
    PayToAddress = 0x00,
    /// P2SH to a base58check script-hash address
    PayToScriptHash = 0x01,
    /// P2SH wrapping a described multisig redeem script
    PayToMultisig = 0x02,
}

impl Encode for OutputScriptType {
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

impl DecodeOwned for OutputScriptType {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;
        let v = rd_u8(buff, &mut index)?;
        let s = Self::try_from(v).map_err(|_| Error::InvalidEncoding)?;
        Ok((s, index))
    }
}

/// Host-declared destination class of an output
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum OutputAddressType {
    /// Payment to an external address
    Spend = 0x00,
    /// Transfer to another key of this wallet, displayed for confirmation
    Transfer = 0x01,
    /// Change back to this wallet, silently summed
    Change = 0x02,
}

/// One transaction output, as supplied by the host
#[derive(Clone, PartialEq, Debug)]
pub struct TxOutput {
    /// Destination base58check address (external spends)
    pub address: Option<String<ADDRESS_MAX>>,

    /// BIP-32 derivation path (change / transfer destinations)
    pub address_n: Vec<u32, PATH_MAX>,

    /// Amount in base units
    pub amount: u64,

    /// scriptPubKey template
    pub script_type: OutputScriptType,

    /// Destination class; absent for hosts speaking the legacy protocol
    pub address_type: Option<OutputAddressType>,

    /// Multisig group, required for [`OutputScriptType::PayToMultisig`]
    pub multisig: Option<MultisigRedeemScript>,
}

impl Default for TxOutput {
    fn default() -> Self {
        Self {
            address: None,
            address_n: Vec::new(),
            amount: 0,
            script_type: OutputScriptType::PayToAddress,
            address_type: None,
            multisig: None,
        }
    }
}

const OUTPUT_FLAG_ADDRESS: u8 = 1 << 0;
const OUTPUT_FLAG_ADDRESS_TYPE: u8 = 1 << 1;
const OUTPUT_FLAG_MULTISIG: u8 = 1 << 2;

impl Encode for TxOutput {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        let mut n = 1 + 8 + 1 + 1 + 4 * self.address_n.len();
        if let Some(a) = &self.address {
            n += 1 + a.len();
        }
        if self.address_type.is_some() {
            n += 1;
        }
        if let Some(ms) = &self.multisig {
            n += ms.encode_len()?;
        }
        Ok(n)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        let mut flags = 0u8;
        if self.address.is_some() {
            flags |= OUTPUT_FLAG_ADDRESS;
        }
        if self.address_type.is_some() {
            flags |= OUTPUT_FLAG_ADDRESS_TYPE;
        }
        if self.multisig.is_some() {
            flags |= OUTPUT_FLAG_MULTISIG;
        }
        wr_u8(buff, &mut index, flags)?;

        wr_u64(buff, &mut index, self.amount)?;

        index += self.script_type.encode(&mut buff[index..])?;

        if let Some(t) = self.address_type {
            wr_u8(buff, &mut index, t as u8)?;
        }

        wr_u8(buff, &mut index, self.address_n.len() as u8)?;
        for v in &self.address_n {
            wr_u32(buff, &mut index, *v)?;
        }

        if let Some(a) = &self.address {
            wr_u8(buff, &mut index, a.len() as u8)?;
            wr(buff, &mut index, a.as_bytes())?;
        }

        if let Some(ms) = &self.multisig {
            index += ms.encode(&mut buff[index..])?;
        }

        Ok(index)
    }
}

impl DecodeOwned for TxOutput {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let flags = rd_u8(buff, &mut index)?;

        let amount = rd_u64(buff, &mut index)?;

        let (script_type, n) = OutputScriptType::decode_owned(&buff[index..])?;
        index += n;

        let address_type = match flags & OUTPUT_FLAG_ADDRESS_TYPE != 0 {
            true => {
                let v = rd_u8(buff, &mut index)?;
                Some(OutputAddressType::try_from(v).map_err(|_| Error::InvalidEncoding)?)
            }
            false => None,
        };

        let depth = rd_u8(buff, &mut index)? as usize;
        if depth > PATH_MAX {
            return Err(Error::InvalidEncoding);
        }
        let mut address_n = Vec::new();
        for _ in 0..depth {
            let v = rd_u32(buff, &mut index)?;
            address_n.push(v).map_err(|_| Error::InvalidEncoding)?;
        }

        let address = match flags & OUTPUT_FLAG_ADDRESS != 0 {
            true => {
                let l = rd_u8(buff, &mut index)? as usize;
                if l > ADDRESS_MAX {
                    return Err(Error::InvalidEncoding);
                }
                let d = rd(buff, &mut index, l)?;
                let s = core::str::from_utf8(d).map_err(|_| Error::InvalidEncoding)?;
                let mut a = String::new();
                a.push_str(s).map_err(|_| Error::InvalidEncoding)?;
                Some(a)
            }
            false => None,
        };

        let multisig = match flags & OUTPUT_FLAG_MULTISIG != 0 {
            true => {
                let (ms, n) = MultisigRedeemScript::decode_owned(&buff[index..])?;
                index += n;
                Some(ms)
            }
            false => None,
        };

        Ok((
            Self {
                address,
                address_n,
                amount,
                script_type,
                address_type,
                multisig,
            },
            index,
        ))
    }
}

/// A compiled (or previous-transaction) output: amount plus raw scriptPubKey
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TxBinOutput {
    /// Amount in base units
    pub amount: u64,

    /// Raw scriptPubKey bytes
    pub script_pubkey: Vec<u8, SCRIPT_PUBKEY_MAX>,
}

impl TxBinOutput {
    pub fn new(amount: u64, script_pubkey: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            amount,
            script_pubkey: Vec::from_slice(script_pubkey).map_err(|_| Error::InvalidLength)?,
        })
    }
}

impl Encode for TxBinOutput {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        Ok(8 + 2 + self.script_pubkey.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        wr_u64(buff, &mut index, self.amount)?;
        wr_u16(buff, &mut index, self.script_pubkey.len() as u16)?;
        wr(buff, &mut index, &self.script_pubkey)?;

        Ok(index)
    }
}

impl DecodeOwned for TxBinOutput {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let amount = rd_u64(buff, &mut index)?;
        let l = rd_u16(buff, &mut index)? as usize;
        let script_pubkey = rd_vec::<SCRIPT_PUBKEY_MAX>(buff, &mut index, l)?;

        Ok((
            Self {
                amount,
                script_pubkey,
            },
            index,
        ))
    }
}
