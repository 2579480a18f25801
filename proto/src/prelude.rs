// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Prelude re-exporting all message types

pub use crate::{
    ack::TxAck,
    input::{InputScriptType, MultisigRedeemScript, TxInput},
    meta::TxMeta,
    output::{OutputAddressType, OutputScriptType, TxBinOutput, TxOutput},
    request::{RequestType, TxRequest, TxRequestDetails, TxRequestSerialized},
    Error,
};
