#![allow(clippy::too_many_arguments)]

use alloy::sol;

sol! {
    /// @notice Committed description of a proposed L2 block.
    /// @dev Hashed with `keccak256(abi.encode(meta))` at proposal time.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct BlockMetadata {
        uint64 id;
        uint64 l1Height;
        bytes32 l1Hash;
        address beneficiary;
        bytes32 txListHash;
        /// @notice Hash of the transaction list proof, zero before the TxListProof fork.
        bytes32 txListProofHash;
        bytes32 mixHash;
        bytes extraData;
        uint64 gasLimit;
        uint64 timestamp;
        uint64 commitHeight;
        uint64 commitSlot;
    }

    /// @notice L2 block header as hashed by the execution client.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct BlockHeader {
        bytes32 parentHash;
        bytes32 ommersHash;
        address beneficiary;
        bytes32 stateRoot;
        bytes32 transactionsRoot;
        bytes32 receiptsRoot;
        bytes32[8] logsBloom;
        uint256 difficulty;
        uint128 height;
        uint64 gasLimit;
        uint64 gasUsed;
        uint64 timestamp;
        bytes extraData;
        bytes32 mixHash;
        uint64 nonce;
        /// @notice Omitted from the header encoding when zero.
        uint256 baseFeePerGas;
    }

    /// @notice Claim that `header` is the block described by `meta`.
    /// @dev `proofs` holds the zk proofs followed by the merkle proofs required by the fork.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct Evidence {
        BlockMetadata meta;
        BlockHeader header;
        address prover;
        uint16 circuitId;
        bytes[] proofs;
    }

    /// @notice Emitted once a fork choice has been recorded or confirmed.
    #[derive(Debug, PartialEq, Eq)]
    event BlockProven(
        uint256 indexed id,
        bytes32 parentHash,
        bytes32 blockHash,
        uint64 provenAt,
        address prover
    );

    /// @notice Emitted by the protocol contract on L2 when a transaction list cannot be decoded.
    #[derive(Debug, PartialEq, Eq)]
    event BlockInvalidated(bytes32 indexed txListHash);

    /// @notice Calldata of the anchor transaction.
    function anchor(uint256 l1Height, bytes32 l1Hash);
}
