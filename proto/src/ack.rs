// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Inbound acknowledgements from the host

use encdec::{DecodeOwned, Encode};

use crate::{helpers::*, Error, TxBinOutput, TxInput, TxMeta, TxOutput};

/// Host → engine message: exactly one piece of transaction data, answering
/// the engine's last [`TxRequest`][crate::TxRequest]
#[derive(Clone, PartialEq, Debug)]
pub enum TxAck {
    /// An input of the current or a previous transaction
    Input(TxInput),
    /// An output of the transaction being signed
    Output(TxOutput),
    /// An output of a previous transaction, in binary form
    BinOutput(TxBinOutput),
    /// Metadata of a previous transaction
    Meta(TxMeta),
}

const ACK_TAG_INPUT: u8 = 0x01;
const ACK_TAG_OUTPUT: u8 = 0x02;
const ACK_TAG_BIN_OUTPUT: u8 = 0x03;
const ACK_TAG_META: u8 = 0x04;

impl Encode for TxAck {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Error> {
        let n = match self {
            TxAck::Input(v) => v.encode_len()?,
            TxAck::Output(v) => v.encode_len()?,
            TxAck::BinOutput(v) => v.encode_len()?,
            TxAck::Meta(v) => v.encode_len()?,
        };
        Ok(1 + n)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Error> {
        let mut index = 0;

        let tag = match self {
            TxAck::Input(_) => ACK_TAG_INPUT,
            TxAck::Output(_) => ACK_TAG_OUTPUT,
            TxAck::BinOutput(_) => ACK_TAG_BIN_OUTPUT,
            TxAck::Meta(_) => ACK_TAG_META,
        };
        wr_u8(buff, &mut index, tag)?;

        index += match self {
            TxAck::Input(v) => v.encode(&mut buff[index..])?,
            TxAck::Output(v) => v.encode(&mut buff[index..])?,
            TxAck::BinOutput(v) => v.encode(&mut buff[index..])?,
            TxAck::Meta(v) => v.encode(&mut buff[index..])?,
        };

        Ok(index)
    }
}

impl DecodeOwned for TxAck {
    type Output = Self;
    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Error> {
        let mut index = 0;

        let tag = rd_u8(buff, &mut index)?;

        let ack = match tag {
            ACK_TAG_INPUT => {
                let (v, n) = TxInput::decode_owned(&buff[index..])?;
                index += n;
                TxAck::Input(v)
            }
            ACK_TAG_OUTPUT => {
                let (v, n) = TxOutput::decode_owned(&buff[index..])?;
                index += n;
                TxAck::Output(v)
            }
            ACK_TAG_BIN_OUTPUT => {
                let (v, n) = TxBinOutput::decode_owned(&buff[index..])?;
                index += n;
                TxAck::BinOutput(v)
            }
            ACK_TAG_META => {
                let (v, n) = TxMeta::decode_owned(&buff[index..])?;
                index += n;
                TxAck::Meta(v)
            }
            _ => return Err(Error::InvalidEncoding),
        };

        Ok((ack, index))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::encode_decode;

    #[test]
    fn encode_decode_ack_meta() {
        let ack = TxAck::Meta(TxMeta::new(1, 2, 1, 0));

        let mut buff = [0u8; 32];
        encode_decode(&mut buff, &ack);
    }

    #[test]
    fn reject_unknown_tag() {
        assert_eq!(TxAck::decode_owned(&[0x7f]), Err(Error::InvalidEncoding));
    }
}
