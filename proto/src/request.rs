// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Outbound requests from the signing engine to the host

use encdec::{DecodeOwned, Encode};
use heapless::Vec;
use num_enum::TryFromPrimitive;

use crate::{helpers::*, Error, SERIALIZED_TX_MAX, SIGNATURE_MAX};

/// What the engine is asking the host for next
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum RequestType {
    /// An input of the current or a previous transaction
    TxInput = 0x00,
    /// An output of the current or a previous transaction
    TxOutput = 0x01,
    /// Metadata of a previous transaction
    TxMeta = 0x02,
    /// Nothing; the transaction is complete
    TxFinished = 0x03,
}

/// Addressing detail for a request: which index, and (for previous
/// transactions) which transaction
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TxRequestDetails {
    /// Index of the requested input / output
    pub request_index: Option<u32>,

    /// Previous transaction being unpacked, display order
    pub tx_hash: Option<[u8; 32]>,
}

/// Signed material travelling with a request
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TxRequestSerialized {
    /// Index of the input this signature belongs to
    pub signature_index: Option<u32>,

    /// DER-encoded ECDSA signature (no sighash byte)
    pub signature: Vec<u8, SIGNATURE_MAX>,

    /// Serialized transaction fragment (one input or output)
    pub serialized_tx: Vec<u8, SERIALIZED_TX_MAX>,
}

/// Engine → host message: the next request, optionally carrying signed
/// serialized material produced by the previous step
#[derive(Clone, PartialEq, Debug)]
pub struct TxRequest {
    /// Requested item
    pub request_type: RequestType,

    /// Request addressing
    pub details: Option<TxRequestDetails>,

    /// Signed / serialized material
    pub serialized: Option<TxRequestSerialized>,
}

impl TxRequest {
    fn with_details(request_type: RequestType, index: Option<u32>, hash: Option<&[u8; 32]>) -> Self {
        Self {
            request_type,
            details: Some(TxRequestDetails {
                request_index: index,
                tx_hash: hash.copied(),
            }),
            serialized: None,
        }
    }

    /// Request input `index` of the transaction being signed
    pub fn input(index: u32) -> Self {
        Self::with_details(RequestType::TxInput, Some(index), None)
    }

    /// Request the header of previous transaction `hash`
    pub fn prev_meta(hash: &[u8; 32]) -> Self {
        Self::with_details(RequestType::TxMeta, None, Some(hash))
    }

    /// Request input `index` of previous transaction `hash`
    pub fn prev_input(index: u32, hash: &[u8; 32]) -> Self {
        Self::with_details(RequestType::TxInput, Some(index), Some(hash))
    }

    /// Request output `index` of previous transaction `hash`, in binary form
    pub fn prev_output(index: u32, hash: &[u8; 32]) -> Self {
        Self::with_details(RequestType::TxOutput, Some(index), Some(hash))
    }

    /// Request output `index` of the transaction being signed
    pub fn output(index: u32) -> Self {
        Self::with_details(RequestType::TxOutput, Some(index), None)
    }

    /// Signal completion
    pub fn finished() -> Self {
        Self {
            request_type: RequestType::TxFinished,
            details: None,
            serialized: None,
        }
    }

    /// Attach a signature for input `index`
    pub fn with_signature(mut self, index: u32, signature: Vec<u8, SIGNATURE_MAX>) -> Self {
        let s = self.serialized.get_or_insert_with(Default::default);
        s.signature_index = Some(index);
        s.signature = signature;
        self
    }

    /// Attach a serialized transaction fragment
    pub fn with_serialized_tx(mut self, serialized_tx: Vec<u8, SERIALIZED_TX_MAX>) -> Self {
        let s = self.serialized.get_or_insert_with(Default::default);
        s.serialized_tx = serialized_tx;
        self
    }
}

const REQUEST_FLAG_DETAILS: u8 = 1 << 0;
const REQUEST_FLAG_SERIALIZED: u8 = 1 << 1;

const DETAILS_FLAG_INDEX: u8 = 1 << 0;
const DETAILS_FLAG_HASH: u8 = 1 << 1;

const SERIALIZED_FLAG_SIG_INDEX: u8 = 1 << 0;

impl Encode for TxRequest {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        let mut n = 2;
        if let Some(d) = &self.details {
            n += 1;
            if d.request_index.is_some() {
                n += 4;
            }
            if d.tx_hash.is_some() {
                n += 32;
            }
        }
        if let Some(s) = &self.serialized {
            n += 1;
            if s.signature_index.is_some() {
                n += 4;
            }
            n += 1 + s.signature.len() + 2 + s.serialized_tx.len();
        }
        Ok(n)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        wr_u8(buff, &mut index, self.request_type as u8)?;

        let mut flags = 0u8;
        if self.details.is_some() {
            flags |= REQUEST_FLAG_DETAILS;
        }
        if self.serialized.is_some() {
            flags |= REQUEST_FLAG_SERIALIZED;
        }
        wr_u8(buff, &mut index, flags)?;

        if let Some(d) = &self.details {
            let mut f = 0u8;
            if d.request_index.is_some() {
                f |= DETAILS_FLAG_INDEX;
            }
            if d.tx_hash.is_some() {
                f |= DETAILS_FLAG_HASH;
            }
            wr_u8(buff, &mut index, f)?;

            if let Some(i) = d.request_index {
                wr_u32(buff, &mut index, i)?;
            }
            if let Some(h) = &d.tx_hash {
                wr(buff, &mut index, h)?;
            }
        }

        if let Some(s) = &self.serialized {
            let mut f = 0u8;
            if s.signature_index.is_some() {
                f |= SERIALIZED_FLAG_SIG_INDEX;
            }
            wr_u8(buff, &mut index, f)?;

            if let Some(i) = s.signature_index {
                wr_u32(buff, &mut index, i)?;
            }
            wr_u8(buff, &mut index, s.signature.len() as u8)?;
            wr(buff, &mut index, &s.signature)?;
            wr_u16(buff, &mut index, s.serialized_tx.len() as u16)?;
            wr(buff, &mut index, &s.serialized_tx)?;
        }

        Ok(index)
    }
}

impl DecodeOwned for TxRequest {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let t = rd_u8(buff, &mut index)?;
        let request_type = RequestType::try_from(t).map_err(|_| Error::InvalidEncoding)?;

        let flags = rd_u8(buff, &mut index)?;

        let details = match flags & REQUEST_FLAG_DETAILS != 0 {
            true => {
                let f = rd_u8(buff, &mut index)?;

                let request_index = match f & DETAILS_FLAG_INDEX != 0 {
                    true => Some(rd_u32(buff, &mut index)?),
                    false => None,
                };
                let tx_hash = match f & DETAILS_FLAG_HASH != 0 {
                    true => Some(rd_arr::<32>(buff, &mut index)?),
                    false => None,
                };

                Some(TxRequestDetails {
                    request_index,
                    tx_hash,
                })
            }
            false => None,
        };

        let serialized = match flags & REQUEST_FLAG_SERIALIZED != 0 {
            true => {
                let f = rd_u8(buff, &mut index)?;

                let signature_index = match f & SERIALIZED_FLAG_SIG_INDEX != 0 {
                    true => Some(rd_u32(buff, &mut index)?),
                    false => None,
                };

                let l = rd_u8(buff, &mut index)? as usize;
                let signature = rd_vec::<SIGNATURE_MAX>(buff, &mut index, l)?;

                let l = rd_u16(buff, &mut index)? as usize;
                let serialized_tx = rd_vec::<SERIALIZED_TX_MAX>(buff, &mut index, l)?;

                Some(TxRequestSerialized {
                    signature_index,
                    signature,
                    serialized_tx,
                })
            }
            false => None,
        };

        Ok((
            Self {
                request_type,
                details,
                serialized,
            },
            index,
        ))
    }
}
