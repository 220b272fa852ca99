// Shared modules for the block prover
pub mod crypto;
pub mod fork_info;
pub mod l2;
pub mod utils;
