pub mod fixed_k_signer;
