#![allow(unused)]

use secp256k1::{All, Secp256k1};

use streamsign_core::coins::BITCOIN;
use streamsign_core::crypto;
use streamsign_core::engine::{Driver, Engine, Error};
use streamsign_core::hd::HdNode;
use streamsign_core::proto::{
    DecodeOwned, Encode, InputScriptType, MultisigRedeemScript, OutputAddressType,
    OutputScriptType, RequestType, TxAck, TxBinOutput, TxInput, TxMeta, TxOutput, TxRequest,
};
use streamsign_core::script;

pub const SEED: [u8; 32] = [0x42; 32];

/// Recording driver: approves according to its flags and captures every
/// prompt for inspection
pub struct TestDriver {
    pub approve_outputs: bool,
    pub approve_fee: bool,
    pub approve_tx: bool,

    pub output_prompts: Vec<(String, String)>,
    pub fee_prompts: Vec<String>,
    pub tx_prompts: Vec<(String, String)>,
    pub homed: usize,
}

impl TestDriver {
    pub fn approving() -> Self {
        Self {
            approve_outputs: true,
            approve_fee: true,
            approve_tx: true,
            output_prompts: Vec::new(),
            fee_prompts: Vec::new(),
            tx_prompts: Vec::new(),
            homed: 0,
        }
    }
}

impl Driver for TestDriver {
    fn confirm_output(&mut self, amount: &str, to: &str) -> bool {
        log::debug!("confirm output: {} -> {}", amount, to);

        self.output_prompts.push((amount.into(), to.into()));
        self.approve_outputs
    }

    fn confirm_fee(&mut self, fee: &str) -> bool {
        log::debug!("confirm fee: {}", fee);

        self.fee_prompts.push(fee.into());
        self.approve_fee
    }

    fn confirm_transaction(&mut self, total: &str, fee: &str) -> bool {
        log::debug!("confirm transaction: {} (fee {})", total, fee);

        self.tx_prompts.push((total.into(), fee.into()));
        self.approve_tx
    }

    fn home(&mut self) {
        self.homed += 1;
    }
}

/// A fully-known previous transaction held host-side
#[derive(Clone, Debug)]
pub struct PrevTx {
    pub version: u32,
    pub lock_time: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxBinOutput>,
}

impl PrevTx {
    /// Single-input previous transaction funding the given outputs
    pub fn funding(outputs: &[TxBinOutput]) -> Self {
        let mut input = TxInput {
            prev_hash: [0x51; 32],
            prev_index: 0,
            ..Default::default()
        };
        input.script_sig.extend_from_slice(&[0x00, 0x51]).unwrap();

        Self {
            version: 1,
            lock_time: 0,
            inputs: vec![input],
            outputs: outputs.to_vec(),
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        flat_tx(self.version, self.lock_time, &self.inputs, &self.outputs, false)
    }

    /// Transaction id, display order
    pub fn txid(&self) -> [u8; 32] {
        let mut h = crypto::sha256d(&self.serialize());
        h.reverse();
        h
    }
}

/// Flat whole-transaction serializer, independent of the engine's streaming
/// codec; counts stay below the one-byte varint range in tests
pub fn flat_tx(
    version: u32,
    lock_time: u32,
    inputs: &[TxInput],
    outputs: &[TxBinOutput],
    add_hash_type: bool,
) -> Vec<u8> {
    let mut out = Vec::new();

    out.extend_from_slice(&version.to_le_bytes());
    out.push(inputs.len() as u8);
    for i in inputs {
        let mut rev = i.prev_hash;
        rev.reverse();
        out.extend_from_slice(&rev);
        out.extend_from_slice(&i.prev_index.to_le_bytes());
        out.push(i.script_sig.len() as u8);
        out.extend_from_slice(&i.script_sig);
        out.extend_from_slice(&i.sequence.to_le_bytes());
    }
    out.push(outputs.len() as u8);
    for o in outputs {
        out.extend_from_slice(&o.amount.to_le_bytes());
        out.push(o.script_pubkey.len() as u8);
        out.extend_from_slice(&o.script_pubkey);
    }
    out.extend_from_slice(&lock_time.to_le_bytes());
    if add_hash_type {
        out.extend_from_slice(&1u32.to_le_bytes());
    }

    out
}

/// Host simulator: owns the transaction being signed plus every referenced
/// previous transaction, and answers engine requests (routed through the
/// wire encodings both ways)
pub struct Host {
    pub prev_txs: Vec<([u8; 32], PrevTx)>,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,

    /// Applied to inputs re-served during Phase 2 (tamper testing)
    pub phase2_input_tamper: Option<fn(&mut TxInput, u32)>,

    input_serves: Vec<u32>,
}

impl Host {
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let input_serves = vec![0; inputs.len()];
        Self {
            prev_txs: Vec::new(),
            inputs,
            outputs,
            phase2_input_tamper: None,
            input_serves,
        }
    }

    /// Register a previous transaction, returning its id
    pub fn add_prev(&mut self, tx: PrevTx) -> [u8; 32] {
        let id = tx.txid();
        self.prev_txs.push((id, tx));
        id
    }

    fn prev(&self, hash: &[u8; 32]) -> &PrevTx {
        &self
            .prev_txs
            .iter()
            .find(|(id, _)| id == hash)
            .expect("unknown prev tx requested")
            .1
    }

    fn answer(&mut self, req: &TxRequest) -> TxAck {
        let details = req.details.as_ref().expect("request without details");
        let index = details.request_index.unwrap_or(0) as usize;

        match (req.request_type, details.tx_hash) {
            (RequestType::TxMeta, Some(hash)) => {
                let p = self.prev(&hash);
                TxAck::Meta(TxMeta::new(
                    p.inputs.len() as u32,
                    p.outputs.len() as u32,
                    p.version,
                    p.lock_time,
                ))
            }
            (RequestType::TxInput, Some(hash)) => {
                TxAck::Input(self.prev(&hash).inputs[index].clone())
            }
            (RequestType::TxOutput, Some(hash)) => {
                TxAck::BinOutput(self.prev(&hash).outputs[index].clone())
            }
            (RequestType::TxInput, None) => {
                let mut input = self.inputs[index].clone();

                let served = self.input_serves[index];
                self.input_serves[index] += 1;

                // first serve is the Phase-1 walk, everything after is a
                // Phase-2 rescan
                if served > 0 {
                    if let Some(tamper) = self.phase2_input_tamper {
                        tamper(&mut input, index as u32);
                    }
                }

                TxAck::Input(input)
            }
            (RequestType::TxOutput, None) => TxAck::Output(self.outputs[index].clone()),
            _ => panic!("unanswerable request: {req:?}"),
        }
    }
}

/// Material collected from a completed signing run
#[derive(Default, Debug, PartialEq)]
pub struct RunResult {
    /// (signature_index, DER signature) pairs in emission order
    pub signatures: Vec<(u32, Vec<u8>)>,

    /// Concatenated serialized fragments: the signed transaction
    pub serialized: Vec<u8>,
}

/// Drive the engine from `first` to completion or failure, round-tripping
/// every message through its wire encoding
pub fn run<DRV: Driver>(
    host: &mut Host,
    engine: &mut Engine<DRV>,
    first: TxRequest,
) -> Result<RunResult, Error> {
    let mut result = RunResult::default();
    let mut req = first;
    let mut buff = [0u8; 4096];

    loop {
        let n = req.encode(&mut buff).expect("encode request");
        let (decoded, _) = TxRequest::decode_owned(&buff[..n]).expect("decode request");

        if let Some(s) = &decoded.serialized {
            if let Some(i) = s.signature_index {
                result.signatures.push((i, s.signature.to_vec()));
            }
            result.serialized.extend_from_slice(&s.serialized_tx);
        }

        if decoded.request_type == RequestType::TxFinished {
            return Ok(result);
        }

        let ack = host.answer(&decoded);
        let n = ack.encode(&mut buff).expect("encode ack");
        let (ack, _) = TxAck::decode_owned(&buff[..n]).expect("decode ack");

        req = engine.on_ack(&ack)?;
    }
}

// --- builders ------------------------------------------------------------

pub fn root(secp: &Secp256k1<All>) -> HdNode {
    HdNode::from_seed(secp, &SEED).unwrap()
}

/// P2PKH locking script for the key at `path` under the test seed
pub fn p2pkh_script_for(secp: &Secp256k1<All>, path: &[u32]) -> Vec<u8> {
    let node = root(secp).derive(secp, path).unwrap();
    let hash = crypto::hash160(node.public_key());
    script::locking_script(&BITCOIN, 0, &hash).unwrap().to_vec()
}

/// Address of the key at `path` under the test seed
pub fn address_for(secp: &Secp256k1<All>, path: &[u32]) -> String {
    let node = root(secp).derive(secp, path).unwrap();
    let hash = crypto::hash160(node.public_key());
    crypto::address_encode(0, &hash).to_string()
}

/// An external P2PKH address unrelated to the test seed
pub fn external_address(secp: &Secp256k1<All>) -> String {
    let node = HdNode::from_seed(secp, b"somebody else entirely").unwrap();
    let hash = crypto::hash160(node.public_key());
    crypto::address_encode(0, &hash).to_string()
}

pub fn p2pkh_input(prev_hash: [u8; 32], prev_index: u32, path: &[u32]) -> TxInput {
    let mut input = TxInput {
        prev_hash,
        prev_index,
        ..Default::default()
    };
    input.address_n.extend_from_slice(path).unwrap();
    input
}

pub fn multisig_input(
    prev_hash: [u8; 32],
    prev_index: u32,
    path: &[u32],
    multisig: MultisigRedeemScript,
) -> TxInput {
    let mut input = p2pkh_input(prev_hash, prev_index, path);
    input.script_type = InputScriptType::SpendMultisig;
    input.multisig = Some(multisig);
    input
}

pub fn spend_output(address: &str, amount: u64) -> TxOutput {
    let mut a = heapless::String::new();
    a.push_str(address).unwrap();

    TxOutput {
        address: Some(a),
        amount,
        ..Default::default()
    }
}

/// Legacy change output: own path, no explicit destination class
pub fn change_output(path: &[u32], amount: u64) -> TxOutput {
    let mut output = TxOutput {
        amount,
        ..Default::default()
    };
    output.address_n.extend_from_slice(path).unwrap();
    output
}

/// Transfer-to-self output: own path with an explicit Transfer class
pub fn transfer_output(path: &[u32], amount: u64) -> TxOutput {
    let mut output = change_output(path, amount);
    output.address_type = Some(OutputAddressType::Transfer);
    output
}

/// P2SH multisig output described by its redeem group
pub fn multisig_output(multisig: MultisigRedeemScript, amount: u64) -> TxOutput {
    TxOutput {
        amount,
        script_type: OutputScriptType::PayToMultisig,
        multisig: Some(multisig),
        ..Default::default()
    }
}

pub fn bin_output(amount: u64, script_pubkey: &[u8]) -> TxBinOutput {
    TxBinOutput::new(amount, script_pubkey).unwrap()
}

/// 2-of-3 multisig group over keys at paths 10, 11, 12 of the test seed
pub fn test_multisig(secp: &Secp256k1<All>) -> MultisigRedeemScript {
    let r = root(secp);
    let keys: Vec<[u8; 33]> = [10u32, 11, 12]
        .iter()
        .map(|i| *r.derive(secp, &[*i]).unwrap().public_key())
        .collect();

    MultisigRedeemScript::new(2, &keys).unwrap()
}
