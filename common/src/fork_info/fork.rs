use anyhow::Error;
use std::{
    fmt::{Display, Formatter, Result},
    str::FromStr,
};

/// Proving scheme in force for a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fork {
    /// Valid blocks are proven together with their anchor transaction and receipt,
    /// invalid blocks with a `BlockInvalidated` receipt from a throw-away block.
    Anchored,
    /// Invalid blocks are proven with a transaction list proof that fails to verify.
    TxListProof,
}

impl Fork {
    pub fn next(&self) -> Option<Self> {
        match self {
            Fork::Anchored => Some(Fork::TxListProof),
            Fork::TxListProof => None,
        }
    }
}

impl Display for Fork {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Fork {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anchored" => Ok(Fork::Anchored),
            "tx_list_proof" | "txlistproof" => Ok(Fork::TxListProof),
            _ => Err(Error::msg(format!("Invalid fork: {}", s))),
        }
    }
}
