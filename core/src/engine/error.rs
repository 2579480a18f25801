// Copyright (c) 2022-2023 The MobileCoin Foundation

/// Failure classes reported to the host alongside the message
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FailureKind {
    /// Message arrived outside a signing session
    UnexpectedMessage,
    /// User rejected a confirmation
    ActionCancelled,
    /// Declared outputs exceed input funds
    NotEnoughFunds,
    /// Protocol or crypto fault
    Other,
}

/// [Engine][super::Engine] errors; every variant is terminal for the session
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// Ack received with no session active
    #[cfg_attr(feature = "thiserror", error("Not in Signing mode"))]
    NotSigning,

    /// Start requested while a session is active
    #[cfg_attr(feature = "thiserror", error("Signing already in progress"))]
    AlreadySigning,

    /// Input stream violated the declared transaction shape
    #[cfg_attr(feature = "thiserror", error("Failed to serialize input"))]
    SerializeInput,

    /// Output stream violated the declared transaction shape
    #[cfg_attr(feature = "thiserror", error("Failed to serialize output"))]
    SerializeOutput,

    /// Recomputed previous-transaction id does not match the input
    #[cfg_attr(feature = "thiserror", error("Encountered invalid prevhash"))]
    InvalidPrevHash,

    /// Malformed multisig group
    #[cfg_attr(feature = "thiserror", error("Error computing multisig fingerprint"))]
    MultisigFingerprint,

    /// A second change output was classified
    #[cfg_attr(feature = "thiserror", error("Only one change output allowed"))]
    MultipleChange,

    /// `address_type` inconsistent with the output fields
    #[cfg_attr(feature = "thiserror", error("Invalid output address type"))]
    InvalidOutputAddressType,

    /// Output could not be compiled to wire form
    #[cfg_attr(feature = "thiserror", error("Failed to compile output"))]
    CompileOutput,

    /// scriptSig placeholder for the signing input could not be built
    #[cfg_attr(feature = "thiserror", error("Failed to compile input"))]
    CompileInput,

    /// Key derivation along the input path failed
    #[cfg_attr(feature = "thiserror", error("Failed to derive private key"))]
    DeriveKey,

    /// SpendMultisig input without a multisig description
    #[cfg_attr(feature = "thiserror", error("Multisig info not provided"))]
    MultisigMissing,

    /// Signing key absent from the multisig group
    #[cfg_attr(feature = "thiserror", error("Pubkey not found in multisig script"))]
    PubkeyNotFound,

    /// Signed multisig scriptSig could not be built
    #[cfg_attr(feature = "thiserror", error("Failed to serialize multisig script"))]
    SerializeMultisig,

    /// Phase-2 stream differs from what the user approved in Phase 1
    #[cfg_attr(feature = "thiserror", error("Transaction has changed during signing"))]
    TxChanged,

    /// Catch-all protocol / crypto fault
    #[cfg_attr(feature = "thiserror", error("Signing error"))]
    Signing,

    /// Declared outputs exceed input funds
    #[cfg_attr(feature = "thiserror", error("Not enough funds"))]
    NotEnoughFunds,

    /// User rejected the over-threshold fee
    #[cfg_attr(feature = "thiserror", error("Fee over threshold. Signing cancelled."))]
    FeeThreshold,

    /// User rejected a confirmation
    #[cfg_attr(feature = "thiserror", error("Signing cancelled by user"))]
    Cancelled,
}

impl Error {
    /// Failure class forwarded with the message by the framing layer
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::NotSigning | Error::AlreadySigning => FailureKind::UnexpectedMessage,
            Error::NotEnoughFunds => FailureKind::NotEnoughFunds,
            Error::FeeThreshold | Error::Cancelled => FailureKind::ActionCancelled,
            _ => FailureKind::Other,
        }
    }

    /// Exact user-visible failure string
    pub fn message(&self) -> &'static str {
        match self {
            Error::NotSigning => "Not in Signing mode",
            Error::AlreadySigning => "Signing already in progress",
            Error::SerializeInput => "Failed to serialize input",
            Error::SerializeOutput => "Failed to serialize output",
            Error::InvalidPrevHash => "Encountered invalid prevhash",
            Error::MultisigFingerprint => "Error computing multisig fingerprint",
            Error::MultipleChange => "Only one change output allowed",
            Error::InvalidOutputAddressType => "Invalid output address type",
            Error::CompileOutput => "Failed to compile output",
            Error::CompileInput => "Failed to compile input",
            Error::DeriveKey => "Failed to derive private key",
            Error::MultisigMissing => "Multisig info not provided",
            Error::PubkeyNotFound => "Pubkey not found in multisig script",
            Error::SerializeMultisig => "Failed to serialize multisig script",
            Error::TxChanged => "Transaction has changed during signing",
            Error::Signing => "Signing error",
            Error::NotEnoughFunds => "Not enough funds",
            Error::FeeThreshold => "Fee over threshold. Signing cancelled.",
            Error::Cancelled => "Signing cancelled by user",
        }
    }
}

#[cfg(not(feature = "thiserror"))]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
