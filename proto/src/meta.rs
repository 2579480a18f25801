// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Previous-transaction metadata message

use encdec::{DecodeOwned, Encode};

use crate::{helpers::*, Error};

/// Header of a previous transaction about to be streamed for re-hashing
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          INPUTS_CNT                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          OUTPUTS_CNT                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           VERSION                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          LOCK_TIME                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct TxMeta {
    /// Number of inputs of the previous transaction
    pub inputs_cnt: u32,

    /// Number of outputs of the previous transaction
    pub outputs_cnt: u32,

    /// Previous transaction version
    pub version: u32,

    /// Previous transaction lock time
    pub lock_time: u32,
}

impl TxMeta {
    pub fn new(inputs_cnt: u32, outputs_cnt: u32, version: u32, lock_time: u32) -> Self {
        Self {
            inputs_cnt,
            outputs_cnt,
            version,
            lock_time,
        }
    }
}

impl Encode for TxMeta {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        Ok(16)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        wr_u32(buff, &mut index, self.inputs_cnt)?;
        wr_u32(buff, &mut index, self.outputs_cnt)?;
        wr_u32(buff, &mut index, self.version)?;
        wr_u32(buff, &mut index, self.lock_time)?;

        Ok(index)
    }
}

impl DecodeOwned for TxMeta {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let inputs_cnt = rd_u32(buff, &mut index)?;
        let outputs_cnt = rd_u32(buff, &mut index)?;
        let version = rd_u32(buff, &mut index)?;
        let lock_time = rd_u32(buff, &mut index)?;

        Ok((
            Self {
                inputs_cnt,
                outputs_cnt,
                version,
                lock_time,
            },
            index,
        ))
    }
}
