use std::fmt;

/// Reasons a proving call is rejected. A rejected call leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProveBlockError {
    InputSize { expected: usize, actual: usize },
    /// A blob could not be decoded into its typed form.
    InvalidEvidence(String),
    Id { expected: u64, actual: u64 },
    IdOutOfRange { id: u64, latest_verified_id: u64, next_block_id: u64 },
    ProofLength { expected: usize, actual: usize },
    MetadataMismatch,
    InvalidProver,
    NameNotResolved(&'static str),
    AnchorType(u8),
    AnchorDest,
    AnchorGasLimit { expected: u64, actual: u64 },
    AnchorCalldata,
    AnchorSigR,
    AnchorSigS,
    AnchorTxProof,
    AnchorReceiptStatus,
    AnchorReceiptProof,
    AnchorReceiptLogs(usize),
    AnchorReceiptAddr,
    AnchorReceiptData,
    AnchorReceiptTopics,
    AlreadyProven,
    ConflictingProof,
    NotOracleProver,
    CannotBeFirstProver,
    TxListProofVerified,
    Zkp,
}

impl ProveBlockError {
    /// Stable identifier of the failure kind, e.g. `ANCHOR_DEST`.
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for ProveBlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProveBlockError::InputSize { expected, actual } => {
                write!(f, "expected {expected} inputs, got {actual}")
            }
            ProveBlockError::InvalidEvidence(msg) => write!(f, "invalid evidence: {msg}"),
            ProveBlockError::Id { expected, actual } => {
                write!(f, "evidence is for block {actual}, expected {expected}")
            }
            ProveBlockError::IdOutOfRange {
                id,
                latest_verified_id,
                next_block_id,
            } => write!(
                f,
                "block {id} is not provable, latest verified {latest_verified_id}, next block {next_block_id}"
            ),
            ProveBlockError::ProofLength { expected, actual } => {
                write!(f, "expected {expected} proofs, got {actual}")
            }
            ProveBlockError::MetadataMismatch => {
                write!(f, "metadata does not match the proposal or the block header")
            }
            ProveBlockError::InvalidProver => write!(f, "prover must not be the zero address"),
            ProveBlockError::NameNotResolved(name) => write!(f, "name {name} is not registered"),
            ProveBlockError::AnchorType(tx_type) => {
                write!(f, "anchor tx must be a legacy transaction, got type {tx_type}")
            }
            ProveBlockError::AnchorDest => write!(f, "anchor tx destination mismatch"),
            ProveBlockError::AnchorGasLimit { expected, actual } => {
                write!(f, "anchor tx gas limit {actual}, expected {expected}")
            }
            ProveBlockError::AnchorCalldata => write!(f, "anchor tx calldata mismatch"),
            ProveBlockError::AnchorSigR => write!(f, "anchor tx signature r is not deterministic"),
            ProveBlockError::AnchorSigS => {
                write!(f, "anchor tx signed with k = 2 while k = 1 was usable")
            }
            ProveBlockError::AnchorTxProof => {
                write!(f, "anchor tx is not the first transaction of the block")
            }
            ProveBlockError::AnchorReceiptStatus => write!(f, "receipt status is not success"),
            ProveBlockError::AnchorReceiptProof => {
                write!(f, "receipt is not the first receipt of the block")
            }
            ProveBlockError::AnchorReceiptLogs(count) => {
                write!(f, "receipt must contain exactly one log, got {count}")
            }
            ProveBlockError::AnchorReceiptAddr => write!(f, "log emitter mismatch"),
            ProveBlockError::AnchorReceiptData => write!(f, "log data must be empty"),
            ProveBlockError::AnchorReceiptTopics => write!(f, "log topics mismatch"),
            ProveBlockError::AlreadyProven => write!(f, "fork choice already has a prover"),
            ProveBlockError::ConflictingProof => {
                write!(f, "claimed block hash conflicts with the recorded one")
            }
            ProveBlockError::NotOracleProver => {
                write!(f, "only the oracle prover may submit the first proof")
            }
            ProveBlockError::CannotBeFirstProver => {
                write!(f, "the first proof must come from the oracle prover")
            }
            ProveBlockError::TxListProofVerified => {
                write!(f, "transaction list proof verified, block is not invalid")
            }
            ProveBlockError::Zkp => write!(f, "zk proof verification failed"),
        }
    }
}

impl std::error::Error for ProveBlockError {}
