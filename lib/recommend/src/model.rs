//! Recommendation vocabulary

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockchainType {
    Consortium,
    Public,
    Private,
}

impl BlockchainType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockchainType::Consortium => "Consortium",
            BlockchainType::Public => "Public",
            BlockchainType::Private => "Private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    #[serde(rename = "Hyperledger Fabric")]
    HyperledgerFabric,
    Quorum,
    Solana,
    Polygon,
    Ethereum,
    #[serde(rename = "Hyperledger Besu")]
    HyperledgerBesu,
    #[serde(rename = "Custom Private Chain")]
    CustomPrivateChain,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::HyperledgerFabric => "Hyperledger Fabric",
            Platform::Quorum => "Quorum",
            Platform::Solana => "Solana",
            Platform::Polygon => "Polygon",
            Platform::Ethereum => "Ethereum",
            Platform::HyperledgerBesu => "Hyperledger Besu",
            Platform::CustomPrivateChain => "Custom Private Chain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Consensus {
    #[serde(rename = "PBFT")]
    Pbft,
    #[serde(rename = "RAFT")]
    Raft,
    #[serde(rename = "IBFT2")]
    Ibft2,
    #[serde(rename = "PoS")]
    ProofOfStake,
}

impl Consensus {
    pub fn as_str(self) -> &'static str {
        match self {
            Consensus::Pbft => "PBFT",
            Consensus::Raft => "RAFT",
            Consensus::Ibft2 => "IBFT2",
            Consensus::ProofOfStake => "PoS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Storage {
    #[serde(rename = "Off-chain with IPFS or hybrid")]
    OffChainIpfsHybrid,
    #[serde(rename = "On-chain with Merkle proofs")]
    OnChainMerkleProofs,
    #[serde(rename = "Off-chain or centralized DB")]
    OffChainCentralized,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::OffChainIpfsHybrid => "Off-chain with IPFS or hybrid",
            Storage::OnChainMerkleProofs => "On-chain with Merkle proofs",
            Storage::OffChainCentralized => "Off-chain or centralized DB",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(BlockchainType, Platform, Consensus, Storage);

/// Architecture recommendation derived solely from a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub blockchain_type: BlockchainType,
    pub platform: Platform,
    pub consensus: Consensus,
    pub storage: Storage,
    pub network_suggestion: &'static str,
    /// May be empty
    pub security_advice: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names_match_display() {
        for platform in [
            Platform::HyperledgerFabric,
            Platform::Quorum,
            Platform::Solana,
            Platform::Polygon,
            Platform::Ethereum,
            Platform::HyperledgerBesu,
            Platform::CustomPrivateChain,
        ] {
            let json = serde_json::to_value(platform).unwrap();
            assert_eq!(json, platform.to_string());
        }
        for consensus in [Consensus::Pbft, Consensus::Raft, Consensus::Ibft2, Consensus::ProofOfStake] {
            assert_eq!(serde_json::to_value(consensus).unwrap(), consensus.as_str());
        }
        assert_eq!(
            serde_json::to_value(Storage::OnChainMerkleProofs).unwrap(),
            "On-chain with Merkle proofs"
        );
    }
}
