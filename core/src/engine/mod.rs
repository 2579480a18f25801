// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] drives the streamed two-phase signing protocol.
//!
//! This handles [TxAck] inputs and returns [TxRequest] responses to the
//! caller, see [crate::proto] for message types and wire encodings.

use heapless::Vec;
use secp256k1::{All, Message, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use strum::{Display, EnumIter, EnumString};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::coins::CoinParams;
use crate::crypto;
use crate::hd::HdNode;
use crate::proto::{
    InputScriptType, OutputAddressType, OutputScriptType, TxAck, TxInput, TxOutput, TxRequest,
    SIGNATURE_MAX,
};
use crate::script;
use crate::tx::{self, CompileError, TxSerializer, LOCK_TIME, VERSION};

mod error;
pub use error::{Error, FailureKind};

/// Protocol stage: which piece of the transaction the engine has asked the
/// host for, and hence how the next [TxAck] is interpreted
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumIter)]
pub enum Stage {
    /// Phase 1: fetching an input of the transaction being signed
    Input,
    /// Phase 1: fetching the header of an input's previous transaction
    PrevMeta,
    /// Phase 1: re-hashing an input of a previous transaction
    PrevInput,
    /// Phase 1: re-hashing an output of a previous transaction
    PrevOutput,
    /// Phase 1: fetching, classifying and confirming an output
    Output,
    /// Phase 2: re-fetching inputs while building one signing digest
    SignInput,
    /// Phase 2: re-fetching outputs while building one signing digest
    SignOutput,
    /// Phase 2: emitting serialized outputs
    FinalOutput,
}

/// [`Driver`] trait provides platform confirmation support for [`Engine`]
/// instances. Prompts block until the user decides; `false` aborts the
/// session.
pub trait Driver {
    /// Confirm sending `amount` to destination `to`
    fn confirm_output(&mut self, amount: &str, to: &str) -> bool;

    /// Confirm a fee exceeding the coin's per-kilobyte threshold
    fn confirm_fee(&mut self, fee: &str) -> bool;

    /// Final confirmation of total amount and fee
    fn confirm_transaction(&mut self, total: &str, fee: &str) -> bool;

    /// Return the UI to the home screen on session end
    fn home(&mut self) {}
}

impl<T: Driver> Driver for &mut T {
    fn confirm_output(&mut self, amount: &str, to: &str) -> bool {
        T::confirm_output(self, amount, to)
    }

    fn confirm_fee(&mut self, fee: &str) -> bool {
        T::confirm_fee(self, fee)
    }

    fn confirm_transaction(&mut self, total: &str, fee: &str) -> bool {
        T::confirm_transaction(self, total, fee)
    }

    fn home(&mut self) {
        T::home(self)
    }
}

/// Key material for the input currently being signed; wiped on every exit
/// path and at each Phase-2 restart
#[derive(Zeroize, ZeroizeOnDrop)]
struct SigningKeys {
    privkey: [u8; 32],
    pubkey: [u8; 33],
}

impl Default for SigningKeys {
    fn default() -> Self {
        Self {
            privkey: [0u8; 32],
            pubkey: [0u8; 33],
        }
    }
}

/// State of one signing session, owned by the [Engine] while active
struct SigningSession {
    inputs_count: u32,
    outputs_count: u32,
    coin: CoinParams,
    root: HdNode,

    stage: Stage,

    /// Outer walk index (inputs, then outputs, then signing passes)
    idx1: u32,
    /// Inner walk index (previous-transaction pieces, Phase-2 rescans)
    idx2: u32,

    /// Funds provided by the inputs, proven via previous transactions
    to_spend: u64,
    /// Funds consumed by the outputs
    spending: u64,
    /// Funds returning to this wallet via the (single) change output
    change_spend: u64,
    change_seen: bool,

    /// Input held across the prev-tx sub-walk / the signing walk
    input: TxInput,

    /// Anti-tamper checksum over the session shape and every piece, in
    /// order; Phase 2 must reproduce `hash_check` exactly
    checksum: Sha256,
    hash_check: [u8; 32],

    /// Re-hash of the previous transaction referenced by `input`
    prev: Option<TxSerializer>,

    /// Signing-digest builder for the input at `idx1`
    sign: Option<TxSerializer>,

    /// Emit-mode serializer for the signed transaction fragments
    stream: TxSerializer,

    multisig_fp: [u8; 32],
    multisig_fp_set: bool,
    multisig_fp_mismatch: bool,

    keys: SigningKeys,
}

impl SigningSession {
    fn req_input(&mut self) -> TxRequest {
        self.stage = Stage::Input;
        TxRequest::input(self.idx1)
    }

    fn req_prev_meta(&mut self) -> TxRequest {
        self.stage = Stage::PrevMeta;
        TxRequest::prev_meta(&self.input.prev_hash)
    }

    fn req_prev_input(&mut self) -> TxRequest {
        self.stage = Stage::PrevInput;
        TxRequest::prev_input(self.idx2, &self.input.prev_hash)
    }

    fn req_prev_output(&mut self) -> TxRequest {
        self.stage = Stage::PrevOutput;
        TxRequest::prev_output(self.idx2, &self.input.prev_hash)
    }

    fn req_output(&mut self) -> TxRequest {
        self.stage = Stage::Output;
        TxRequest::output(self.idx1)
    }

    fn req_sign_input(&mut self) -> TxRequest {
        self.stage = Stage::SignInput;
        TxRequest::input(self.idx2)
    }

    fn req_sign_output(&mut self) -> TxRequest {
        self.stage = Stage::SignOutput;
        TxRequest::output(self.idx2)
    }

    fn req_final_output(&mut self) -> TxRequest {
        self.stage = Stage::FinalOutput;
        TxRequest::output(self.idx1)
    }

    /// Classify a Phase-1 output as change or spend (§ change rules: shared
    /// multisig fingerprint, explicit Change destination, or the legacy
    /// own-path rule when no destination class is present)
    fn classify_change(&self, output: &TxOutput) -> Result<bool, Error> {
        if output.script_type == OutputScriptType::PayToMultisig
            && output.multisig.is_some()
            && self.multisig_fp_set
            && !self.multisig_fp_mismatch
        {
            let ms = output.multisig.as_ref().ok_or(Error::Signing)?;
            let fp = crypto::multisig_fingerprint(ms).ok_or(Error::MultisigFingerprint)?;
            return Ok(fp == self.multisig_fp);
        }

        match output.address_type {
            Some(t) => {
                let valid = match t {
                    OutputAddressType::Spend => output.address.is_some(),
                    OutputAddressType::Transfer | OutputAddressType::Change => {
                        !output.address_n.is_empty()
                    }
                };
                if !valid {
                    return Err(Error::InvalidOutputAddressType);
                }

                Ok(t == OutputAddressType::Change
                    && output.script_type == OutputScriptType::PayToAddress
                    && !output.address_n.is_empty())
            }
            None => Ok(output.script_type == OutputScriptType::PayToAddress
                && !output.address_n.is_empty()),
        }
    }

    /// Track the multisig fingerprint shared by the inputs seen so far; a
    /// SpendAddress input or a differing group permanently disables
    /// multisig change detection
    fn update_multisig_fp(&mut self, input: &TxInput) -> Result<(), Error> {
        if input.script_type != InputScriptType::SpendMultisig {
            self.multisig_fp_mismatch = true;
            return Ok(());
        }

        let ms = match &input.multisig {
            Some(ms) if !self.multisig_fp_mismatch => ms,
            _ => return Ok(()),
        };

        let fp = crypto::multisig_fingerprint(ms).ok_or(Error::MultisigFingerprint)?;

        if self.multisig_fp_set {
            if fp != self.multisig_fp {
                self.multisig_fp_mismatch = true;
            }
        } else {
            self.multisig_fp = fp;
            self.multisig_fp_set = true;
        }

        Ok(())
    }
}

/// Transaction signing engine: one long dispatch over
/// `(stage, acknowledgement)` driven by the host, emitting exactly one
/// outbound message per call
pub struct Engine<DRV: Driver> {
    session: Option<SigningSession>,
    secp: Secp256k1<All>,
    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new signing engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            session: None,
            secp: Secp256k1::new(),
            drv,
        }
    }

    /// Whether a signing session is active
    pub fn is_signing(&self) -> bool {
        self.session.is_some()
    }

    /// Current protocol stage, if a session is active
    pub fn stage(&self) -> Option<Stage> {
        self.session.as_ref().map(|s| s.stage)
    }

    /// Borrow the platform driver
    pub fn driver(&self) -> &DRV {
        &self.drv
    }

    /// Start a signing session: zero the totals, seed the anti-tamper
    /// checksum with the declared shape, and request the first input.
    ///
    /// Refuses while a session is active; the active session is unaffected.
    pub fn start(
        &mut self,
        inputs_count: u32,
        outputs_count: u32,
        coin: CoinParams,
        root: HdNode,
    ) -> Result<TxRequest, Error> {
        if self.session.is_some() {
            return Err(Error::AlreadySigning);
        }

        #[cfg(feature = "log")]
        log::debug!(
            "start signing: {} inputs, {} outputs ({})",
            inputs_count,
            outputs_count,
            coin.coin_name
        );

        let mut session = SigningSession {
            inputs_count,
            outputs_count,
            coin,
            root,
            stage: Stage::Input,
            idx1: 0,
            idx2: 0,
            to_spend: 0,
            spending: 0,
            change_spend: 0,
            change_seen: false,
            input: TxInput::default(),
            checksum: tx::checksum_seed(inputs_count, outputs_count),
            hash_check: [0u8; 32],
            prev: None,
            sign: None,
            stream: TxSerializer::new(inputs_count, outputs_count, VERSION, LOCK_TIME, false),
            multisig_fp: [0u8; 32],
            multisig_fp_set: false,
            multisig_fp_mismatch: false,
            keys: SigningKeys::default(),
        };

        let req = session.req_input();
        self.session = Some(session);

        Ok(req)
    }

    /// Process one host acknowledgement according to the current stage.
    ///
    /// Returns the single outbound message for this step; any error is
    /// terminal, wiping the session before it is returned.
    pub fn on_ack(&mut self, ack: &TxAck) -> Result<TxRequest, Error> {
        let r = self.handle(ack);

        if let Err(_e) = &r {
            #[cfg(feature = "log")]
            log::warn!("signing failed: {:?}", _e);

            self.abort();
        }

        r
    }

    /// Discard the session, wiping private key material, and return the UI
    /// to idle
    pub fn abort(&mut self) {
        Self::teardown(&mut self.session, &mut self.drv);
    }

    fn teardown(session: &mut Option<SigningSession>, drv: &mut DRV) {
        if let Some(mut sess) = session.take() {
            sess.keys.zeroize();
            sess.root.zeroize();
            drv.home();
        }
    }

    fn handle(&mut self, ack: &TxAck) -> Result<TxRequest, Error> {
        let Engine { session, secp, drv } = self;

        let sess = match session.as_mut() {
            Some(s) => s,
            None => {
                drv.home();
                return Err(Error::NotSigning);
            }
        };

        match (sess.stage, ack) {
            // Phase 1: input received, fold it into the checksum and walk
            // its previous transaction
            (Stage::Input, TxAck::Input(input)) => {
                sess.update_multisig_fp(input)?;

                tx::checksum_input(&mut sess.checksum, input);
                sess.input = input.clone();

                Ok(sess.req_prev_meta())
            }

            // Phase 1: previous-transaction header
            (Stage::PrevMeta, TxAck::Meta(meta)) => {
                sess.prev = Some(TxSerializer::new(
                    meta.inputs_cnt,
                    meta.outputs_cnt,
                    meta.version,
                    meta.lock_time,
                    false,
                ));
                sess.idx2 = 0;

                Ok(sess.req_prev_input())
            }

            // Phase 1: previous-transaction input, re-hashed verbatim
            (Stage::PrevInput, TxAck::Input(input)) => {
                let prev = sess.prev.as_mut().ok_or(Error::Signing)?;
                prev.hash_input(input).map_err(|_| Error::SerializeInput)?;

                if sess.idx2 + 1 < prev.inputs_len() {
                    sess.idx2 += 1;
                    Ok(sess.req_prev_input())
                } else {
                    sess.idx2 = 0;
                    Ok(sess.req_prev_output())
                }
            }

            // Phase 1: previous-transaction output; the referenced one
            // funds this input
            (Stage::PrevOutput, TxAck::BinOutput(bin)) => {
                let prev = sess.prev.as_mut().ok_or(Error::Signing)?;
                prev.hash_bin_output(bin)
                    .map_err(|_| Error::SerializeOutput)?;

                if sess.idx2 == sess.input.prev_index {
                    sess.to_spend = sess
                        .to_spend
                        .checked_add(bin.amount)
                        .ok_or(Error::Signing)?;
                }

                let outputs_len = prev.outputs_len();
                if sess.idx2 + 1 < outputs_len {
                    sess.idx2 += 1;
                    return Ok(sess.req_prev_output());
                }

                // prev tx fully streamed: its id must match the claim
                let hash = sess.prev.take().ok_or(Error::Signing)?.finalize(true);
                if hash != sess.input.prev_hash {
                    return Err(Error::InvalidPrevHash);
                }

                if sess.idx1 + 1 < sess.inputs_count {
                    sess.idx1 += 1;
                    Ok(sess.req_input())
                } else {
                    sess.idx1 = 0;
                    Ok(sess.req_output())
                }
            }

            // Phase 1: output received, classify, confirm spends, and fold
            // the compiled form into the checksum
            (Stage::Output, TxAck::Output(output)) => {
                let is_change = sess.classify_change(output)?;

                if is_change {
                    if sess.change_seen {
                        return Err(Error::MultipleChange);
                    }
                    sess.change_seen = true;
                    sess.change_spend = output.amount;
                }

                sess.spending = sess
                    .spending
                    .checked_add(output.amount)
                    .ok_or(Error::Signing)?;

                let bin = tx::compile_output(&sess.coin, &sess.root, secp, output, !is_change, drv)
                    .map_err(|e| match e {
                        CompileError::Cancelled => Error::Cancelled,
                        CompileError::AddressType => Error::InvalidOutputAddressType,
                        CompileError::Invalid => Error::CompileOutput,
                    })?;

                tx::checksum_bin_output(&mut sess.checksum, &bin);

                if sess.idx1 + 1 < sess.outputs_count {
                    sess.idx1 += 1;
                    return Ok(sess.req_output());
                }

                // Phase-1 walk complete: freeze the checksum, check funds
                // and fee, confirm the transaction
                sess.hash_check = sess.checksum.clone().finalize().into();

                if sess.spending > sess.to_spend {
                    return Err(Error::NotEnoughFunds);
                }
                let fee = sess.to_spend - sess.spending;

                let fee_str = sess.coin.format_amount(fee);
                let est_kb = tx::estimate_size_kb(sess.inputs_count, sess.outputs_count);

                if fee > u64::from(est_kb) * sess.coin.maxfee_kb
                    && !drv.confirm_fee(fee_str.as_str())
                {
                    return Err(Error::FeeThreshold);
                }

                let total_str = sess.coin.format_amount(sess.to_spend - sess.change_spend);
                if !drv.confirm_transaction(total_str.as_str(), fee_str.as_str()) {
                    return Err(Error::Cancelled);
                }

                // Everything checked; Phase 2 signs
                sess.idx1 = 0;
                sess.idx2 = 0;
                Ok(sess.req_sign_input())
            }

            // Phase 2: inputs streamed again, this signing pass hashes the
            // target input with its scriptPubKey in place
            (Stage::SignInput, TxAck::Input(input)) => {
                if sess.idx2 == 0 {
                    sess.sign = Some(TxSerializer::new(
                        sess.inputs_count,
                        sess.outputs_count,
                        VERSION,
                        LOCK_TIME,
                        true,
                    ));
                    sess.checksum = tx::checksum_seed(sess.inputs_count, sess.outputs_count);
                    sess.keys.zeroize();
                }

                tx::checksum_input(&mut sess.checksum, input);

                let mut record = input.clone();

                if sess.idx2 == sess.idx1 {
                    sess.input = input.clone();

                    let node = sess
                        .root
                        .derive(secp, &input.address_n)
                        .ok_or(Error::DeriveKey)?;

                    record.script_sig.clear();
                    match input.script_type {
                        InputScriptType::SpendMultisig => {
                            let ms = input.multisig.as_ref().ok_or(Error::MultisigMissing)?;
                            let redeem =
                                script::compile_multisig(ms).ok_or(Error::CompileInput)?;
                            record
                                .script_sig
                                .extend_from_slice(&redeem)
                                .map_err(|_| Error::CompileInput)?;
                        }
                        InputScriptType::SpendAddress => {
                            let hash = crypto::hash160(node.public_key());
                            let script =
                                script::locking_script(&sess.coin, sess.coin.address_type, &hash)
                                    .ok_or(Error::CompileInput)?;
                            record
                                .script_sig
                                .extend_from_slice(&script)
                                .map_err(|_| Error::CompileInput)?;
                        }
                    }
                    if record.script_sig.is_empty() {
                        return Err(Error::CompileInput);
                    }

                    sess.keys.privkey.copy_from_slice(node.private_key());
                    sess.keys.pubkey.copy_from_slice(node.public_key());
                } else {
                    record.script_sig.clear();
                }

                sess.sign
                    .as_mut()
                    .ok_or(Error::Signing)?
                    .hash_input(&record)
                    .map_err(|_| Error::SerializeInput)?;

                if sess.idx2 + 1 < sess.inputs_count {
                    sess.idx2 += 1;
                    Ok(sess.req_sign_input())
                } else {
                    sess.idx2 = 0;
                    Ok(sess.req_sign_output())
                }
            }

            // Phase 2: outputs streamed again (no prompts); at the end the
            // checksum must equal Phase 1's and the digest is signed
            (Stage::SignOutput, TxAck::Output(output)) => {
                let bin = tx::compile_output(&sess.coin, &sess.root, secp, output, false, drv)
                    .map_err(|e| match e {
                        CompileError::Cancelled => Error::Cancelled,
                        CompileError::AddressType => Error::InvalidOutputAddressType,
                        CompileError::Invalid => Error::CompileOutput,
                    })?;

                tx::checksum_bin_output(&mut sess.checksum, &bin);

                sess.sign
                    .as_mut()
                    .ok_or(Error::Signing)?
                    .hash_bin_output(&bin)
                    .map_err(|_| Error::SerializeOutput)?;

                if sess.idx2 + 1 < sess.outputs_count {
                    sess.idx2 += 1;
                    return Ok(sess.req_sign_output());
                }

                let hash: [u8; 32] = sess.checksum.clone().finalize().into();
                if hash != sess.hash_check {
                    return Err(Error::TxChanged);
                }

                let digest = sess.sign.take().ok_or(Error::Signing)?.finalize(false);

                let sk =
                    SecretKey::from_slice(&sess.keys.privkey).map_err(|_| Error::Signing)?;
                let sig = secp.sign_ecdsa(&Message::from_digest(digest), &sk);

                let der = sig.serialize_der();
                let mut signature: Vec<u8, SIGNATURE_MAX> = Vec::new();
                signature
                    .extend_from_slice(&der)
                    .map_err(|_| Error::Signing)?;

                // rewrite the held input's scriptSig with the signature
                if sess.input.script_type == InputScriptType::SpendMultisig {
                    let ms = sess.input.multisig.as_mut().ok_or(Error::MultisigMissing)?;
                    let pi = crypto::multisig_pubkey_index(ms, &sess.keys.pubkey)
                        .ok_or(Error::PubkeyNotFound)?;
                    ms.set_signature(pi, &signature)
                        .map_err(|_| Error::Signing)?;

                    sess.input.script_sig = script::serialize_multisig_script_sig(ms)
                        .ok_or(Error::SerializeMultisig)?;
                } else {
                    sess.input.script_sig =
                        script::serialize_p2pkh_script_sig(&signature, &sess.keys.pubkey)
                            .ok_or(Error::Signing)?;
                }

                let mut serialized_tx = Vec::new();
                sess.stream
                    .serialize_input(&sess.input, &mut serialized_tx)
                    .map_err(|_| Error::SerializeInput)?;

                let signature_index = sess.idx1;
                let req = if sess.idx1 + 1 < sess.inputs_count {
                    sess.idx1 += 1;
                    sess.idx2 = 0;
                    sess.req_sign_input()
                } else {
                    sess.idx1 = 0;
                    sess.req_final_output()
                };

                Ok(req
                    .with_signature(signature_index, signature)
                    .with_serialized_tx(serialized_tx))
            }

            // Phase 2: serialized outputs emitted back to the host
            (Stage::FinalOutput, TxAck::Output(output)) => {
                let bin = tx::compile_output(&sess.coin, &sess.root, secp, output, false, drv)
                    .map_err(|_| Error::CompileOutput)?;

                let mut serialized_tx = Vec::new();
                sess.stream
                    .serialize_bin_output(&bin, &mut serialized_tx)
                    .map_err(|_| Error::SerializeOutput)?;

                if sess.idx1 + 1 < sess.outputs_count {
                    sess.idx1 += 1;
                    Ok(sess.req_final_output().with_serialized_tx(serialized_tx))
                } else {
                    #[cfg(feature = "log")]
                    log::debug!("signing complete, {} bytes streamed", sess.stream.size());

                    Self::teardown(session, drv);
                    Ok(TxRequest::finished().with_serialized_tx(serialized_tx))
                }
            }

            // Stage-inappropriate payloads are terminal
            _ => Err(Error::Signing),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coins::BITCOIN;
    use crate::proto::TxMeta;

    /// Driver approving everything, counting home transitions
    struct TestDriver {
        homed: usize,
    }

    impl TestDriver {
        fn new() -> Self {
            Self { homed: 0 }
        }
    }

    impl Driver for TestDriver {
        fn confirm_output(&mut self, _amount: &str, _to: &str) -> bool {
            true
        }

        fn confirm_fee(&mut self, _fee: &str) -> bool {
            true
        }

        fn confirm_transaction(&mut self, _total: &str, _fee: &str) -> bool {
            true
        }

        fn home(&mut self) {
            self.homed += 1;
        }
    }

    fn root(secp: &Secp256k1<All>) -> HdNode {
        HdNode::from_seed(secp, &[0x42u8; 32]).unwrap()
    }

    #[test]
    fn ack_without_session_rejected() {
        let mut e = Engine::new(TestDriver::new());

        let r = e.on_ack(&TxAck::Meta(TxMeta::new(1, 1, 1, 0)));

        assert_eq!(r, Err(Error::NotSigning));
        assert_eq!(Error::NotSigning.kind(), FailureKind::UnexpectedMessage);
    }

    #[test]
    fn double_start_rejected() {
        let mut e = Engine::new(TestDriver::new());
        let secp = Secp256k1::new();

        let req = e.start(1, 1, BITCOIN, root(&secp)).unwrap();
        assert_eq!(req, TxRequest::input(0));
        assert!(e.is_signing());

        let r = e.start(1, 1, BITCOIN, root(&secp));
        assert_eq!(r, Err(Error::AlreadySigning));

        // the original session is unaffected
        assert_eq!(e.stage(), Some(Stage::Input));
    }

    #[test]
    fn stage_inappropriate_ack_aborts() {
        let mut e = Engine::new(TestDriver::new());
        let secp = Secp256k1::new();

        e.start(1, 1, BITCOIN, root(&secp)).unwrap();

        // an output payload is not a valid answer to an input request
        let r = e.on_ack(&TxAck::Output(TxOutput::default()));

        assert_eq!(r, Err(Error::Signing));
        assert!(!e.is_signing());
        assert_eq!(e.drv.homed, 1);
    }

    #[test]
    fn abort_wipes_session() {
        let mut e = Engine::new(TestDriver::new());
        let secp = Secp256k1::new();

        e.start(2, 1, BITCOIN, root(&secp)).unwrap();

        // plant key material as the signing stages would
        {
            let sess = e.session.as_mut().unwrap();
            sess.keys.privkey = [0xAA; 32];
            sess.keys.pubkey = [0xBB; 33];
        }

        e.abort();

        assert!(!e.is_signing());
        assert_eq!(e.drv.homed, 1);

        // a second abort is a no-op
        e.abort();
        assert_eq!(e.drv.homed, 1);
    }

    #[test]
    fn signing_keys_wipe() {
        let mut keys = SigningKeys {
            privkey: [0x55; 32],
            pubkey: [0x66; 33],
        };

        keys.zeroize();

        assert_eq!(keys.privkey, [0u8; 32]);
        assert_eq!(keys.pubkey, [0u8; 33]);
    }
}
