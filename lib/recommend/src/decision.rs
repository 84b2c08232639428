//! Decision chain
//!
//! Each decision is a pure function of the query, the scenario signals and
//! earlier decisions: type, then platform, then consensus. Storage, network
//! and security advice are decided from the same inputs.

use crate::model::{BlockchainType, Consensus, Platform, Recommendation, Storage};
use chainmatch_core::{CitySize, Query, SecurityLevel};

/// Budget ceiling above which a large city can run on a public chain
pub const PUBLIC_BUDGET_FLOOR: f64 = 500_000.0;
/// Throughput above which public chains need a high-throughput platform
pub const HIGH_TPS: f64 = 5000.0;
/// Throughput above which data moves off-chain
pub const OFF_CHAIN_TPS: f64 = 2000.0;
/// Latency, in seconds, below which Solana is preferred
pub const LOW_LATENCY: f64 = 1.0;

const MULTI_PARTY_TERMS: &[&str] = &[
    "multi-party",
    "multi party",
    "multiparty",
    "cross-organization",
    "cross-organisation",
    "cross organization",
];
const COMPLIANCE_TERMS: &[&str] = &["compliance"];
const BIG_DATA_TERMS: &[&str] = &["big data", "big-data"];
const RECORD_KEEPING_TERMS: &[&str] = &["audit", "documents", "compliance"];
const SENSITIVE_TERMS: &[&str] = &["voting", "finance"];
const JAVA_ECOSYSTEM_TAGS: &[&str] = &["java", "kotlin", "scala", "jvm", "spring", "spring boot"];

pub const NETWORK_CONSORTIUM: &str = "4–10 nodes across organizations with endorsement policies";
pub const NETWORK_PUBLIC: &str = "Participate in validator set or use Layer 2 for performance";
pub const NETWORK_PRIVATE: &str = "1–3 trusted nodes with simplified consensus";

pub const ADVICE_IDENTITY: &str = "Enable Identity Management (CA / MSP)";
pub const ADVICE_CONFIDENTIALITY: &str = "Use Confidential Transactions or ZKP modules";
pub const ADVICE_AUDIT: &str = "Enable audit log & multi-sig controls";

/// Keyword indicators found in the scenario text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioSignals {
    pub multi_party: bool,
    pub compliance: bool,
    pub big_data: bool,
    pub record_keeping: bool,
    pub sensitive: bool,
}

impl ScenarioSignals {
    pub fn detect(scenario: &str) -> Self {
        let text = scenario.to_lowercase();
        let any = |terms: &[&str]| terms.iter().any(|term| text.contains(term));
        Self {
            multi_party: any(MULTI_PARTY_TERMS),
            compliance: any(COMPLIANCE_TERMS),
            big_data: any(BIG_DATA_TERMS),
            record_keeping: any(RECORD_KEEPING_TERMS),
            sensitive: any(SENSITIVE_TERMS),
        }
    }
}

pub fn blockchain_type(query: &Query, signals: &ScenarioSignals) -> BlockchainType {
    let security = query.technical_requirements.security_level;
    if signals.multi_party || security == SecurityLevel::High {
        BlockchainType::Consortium
    } else if query.budget_range.max() > PUBLIC_BUDGET_FLOOR && query.city_size == CitySize::Large {
        BlockchainType::Public
    } else {
        BlockchainType::Private
    }
}

pub fn platform(query: &Query, signals: &ScenarioSignals, kind: BlockchainType) -> Platform {
    let requirements = &query.technical_requirements;
    match kind {
        BlockchainType::Consortium => {
            if requirements.security_level == SecurityLevel::High || signals.compliance {
                Platform::HyperledgerFabric
            } else {
                Platform::Quorum
            }
        }
        BlockchainType::Public => {
            if requirements.tps > HIGH_TPS && requirements.latency < LOW_LATENCY {
                Platform::Solana
            } else if requirements.tps > HIGH_TPS {
                Platform::Polygon
            } else {
                Platform::Ethereum
            }
        }
        BlockchainType::Private => {
            let on_jvm = JAVA_ECOSYSTEM_TAGS
                .iter()
                .any(|tag| query.technology_stack.contains(tag));
            if on_jvm {
                Platform::HyperledgerBesu
            } else {
                Platform::CustomPrivateChain
            }
        }
    }
}

pub fn consensus(query: &Query, platform: Platform) -> Consensus {
    match platform {
        Platform::HyperledgerFabric => Consensus::Pbft,
        Platform::Quorum if query.technical_requirements.security_level == SecurityLevel::Medium => {
            Consensus::Raft
        }
        Platform::Quorum => Consensus::Ibft2,
        Platform::Solana | Platform::Polygon | Platform::Ethereum => Consensus::ProofOfStake,
        Platform::HyperledgerBesu | Platform::CustomPrivateChain => Consensus::Raft,
    }
}

pub fn storage(query: &Query, signals: &ScenarioSignals) -> Storage {
    if signals.big_data || query.technical_requirements.tps > OFF_CHAIN_TPS {
        Storage::OffChainIpfsHybrid
    } else if signals.record_keeping {
        Storage::OnChainMerkleProofs
    } else {
        Storage::OffChainCentralized
    }
}

pub fn network_suggestion(kind: BlockchainType) -> &'static str {
    match kind {
        BlockchainType::Consortium => NETWORK_CONSORTIUM,
        BlockchainType::Public => NETWORK_PUBLIC,
        BlockchainType::Private => NETWORK_PRIVATE,
    }
}

pub fn security_advice(
    query: &Query,
    signals: &ScenarioSignals,
    kind: BlockchainType,
) -> Vec<&'static str> {
    let mut advice = Vec::new();
    if query.technical_requirements.security_level == SecurityLevel::High {
        advice.push(ADVICE_IDENTITY);
        if kind != BlockchainType::Public {
            advice.push(ADVICE_CONFIDENTIALITY);
        }
    }
    if signals.sensitive {
        advice.push(ADVICE_AUDIT);
    }
    advice
}

/// Run the full decision chain
pub fn recommend(query: &Query) -> Recommendation {
    let signals = ScenarioSignals::detect(&query.scenario);

    let blockchain_type = blockchain_type(query, &signals);
    let platform = platform(query, &signals, blockchain_type);
    let consensus = consensus(query, platform);
    let storage = storage(query, &signals);
    let network_suggestion = network_suggestion(blockchain_type);
    let security_advice = security_advice(query, &signals, blockchain_type);

    tracing::debug!(
        %blockchain_type,
        %platform,
        %consensus,
        %storage,
        advice = security_advice.len(),
        "recommendation decided"
    );

    Recommendation {
        blockchain_type,
        platform,
        consensus,
        storage,
        network_suggestion,
        security_advice,
    }
}
