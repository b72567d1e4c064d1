use scoring_core::stats::round_score;
use scoring_core::{ConfidenceLabel, EngineConfig};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{Block, RelativePerformanceInputs, Window};

const AVAILABILITY_WEIGHT: f64 = 0.40;
const CONSISTENCY_WEIGHT: f64 = 0.40;
const UNIVERSE_WEIGHT: f64 = 0.20;

/// Sector-relative position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Leader,
    Follower,
    Laggard,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Leader => "leader",
            Position::Follower => "follower",
            Position::Laggard => "laggard",
        }
    }

    /// Capitalized form used in interpretations
    pub fn label(&self) -> &'static str {
        match self {
            Position::Leader => "Leader",
            Position::Follower => "Follower",
            Position::Laggard => "Laggard",
        }
    }
}

/// Outcome of a single block's vote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockVote {
    /// +1 outperforming, -1 underperforming, 0 tie or no data
    pub vote: i8,
    /// Windows that carried data and passed the horizon filter
    pub participating: u8,
    pub positive: u8,
    pub negative: u8,
}

impl BlockVote {
    pub fn has_data(&self) -> bool {
        self.participating > 0
    }
}

/// Votes of all three blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockVotes {
    pub short: BlockVote,
    pub mid: BlockVote,
    pub long: BlockVote,
}

impl BlockVotes {
    pub fn get(&self, block: Block) -> &BlockVote {
        match block {
            Block::Short => &self.short,
            Block::Mid => &self.mid,
            Block::Long => &self.long,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &BlockVote> {
        [&self.short, &self.mid, &self.long].into_iter()
    }

    pub fn positive_blocks(&self) -> u8 {
        self.iter().filter(|b| b.vote > 0).count() as u8
    }

    pub fn negative_blocks(&self) -> u8 {
        self.iter().filter(|b| b.vote < 0).count() as u8
    }

    pub fn blocks_with_data(&self) -> u8 {
        self.iter().filter(|b| b.has_data()).count() as u8
    }

    pub fn nonzero_blocks(&self) -> u8 {
        self.iter().filter(|b| b.vote != 0).count() as u8
    }
}

/// IFS classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfsResult {
    pub position: Position,
    /// Blocks supporting the position (0..=3)
    pub pressure: u8,
    pub confidence: u8,
    pub confidence_label: ConfidenceLabel,
    pub interpretation: String,
    pub blocks: BlockVotes,
    /// Windows with data, out of 7
    pub available_windows: u8,
}

/// Per-call options for the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct IfsOptions {
    /// Industry-aware horizon filter. `None` runs the legacy mode where every
    /// window with data participates.
    pub dominant_horizons: Option<HashSet<Window>>,
    pub sector_universe_size: u32,
}

impl Default for IfsOptions {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl IfsOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            dominant_horizons: None,
            sector_universe_size: config.sector_universe_size,
        }
    }

    pub fn with_dominant_horizons(mut self, horizons: HashSet<Window>) -> Self {
        self.dominant_horizons = Some(horizons);
        self
    }

    pub fn with_sector_universe_size(mut self, size: u32) -> Self {
        self.sector_universe_size = size;
        self
    }
}

/// Classify with an optional dominant-horizon filter and the default universe size.
///
/// Returns `None` when too few blocks carry evidence to classify.
pub fn classify_industry_fit(
    inputs: &RelativePerformanceInputs,
    dominant_horizons: Option<&HashSet<Window>>,
) -> Option<IfsResult> {
    let options = IfsOptions {
        dominant_horizons: dominant_horizons.cloned(),
        ..IfsOptions::default()
    };
    classify_industry_fit_with(inputs, &options)
}

/// Classify with full options.
pub fn classify_industry_fit_with(
    inputs: &RelativePerformanceInputs,
    options: &IfsOptions,
) -> Option<IfsResult> {
    let dominant = options.dominant_horizons.as_ref();
    let blocks = BlockVotes {
        short: vote_block(inputs, Block::Short, dominant),
        mid: vote_block(inputs, Block::Mid, dominant),
        long: vote_block(inputs, Block::Long, dominant),
    };
    tracing::trace!("IFS block votes: {:?}", blocks);

    if !passes_validity_gate(&blocks, dominant.is_some()) {
        tracing::debug!(
            "IFS rejected: {} blocks with data, {} non-zero votes (filtered: {})",
            blocks.blocks_with_data(),
            blocks.nonzero_blocks(),
            dominant.is_some()
        );
        return None;
    }

    let (position, pressure) = aggregate_votes(&blocks);
    let available = inputs.available_windows();
    let confidence = confidence_score(available, &blocks, options.sector_universe_size);
    let confidence_label = ConfidenceLabel::from_confidence(confidence);

    Some(IfsResult {
        position,
        pressure,
        confidence,
        confidence_label,
        interpretation: format!(
            "{} with {}/3 blocks supporting ({} confidence)",
            position.label(),
            pressure,
            confidence_label.as_str()
        ),
        blocks,
        available_windows: available as u8,
    })
}

/// Majority vote within one block.
///
/// A window participates when it has data and, if a filter is given, is one
/// of the dominant horizons. Exact zeros participate without taking a side.
pub fn vote_block(
    inputs: &RelativePerformanceInputs,
    block: Block,
    dominant_horizons: Option<&HashSet<Window>>,
) -> BlockVote {
    let mut result = BlockVote::default();

    for window in block.windows() {
        if dominant_horizons.map_or(false, |d| !d.contains(window)) {
            continue;
        }
        let Some(value) = inputs.get(*window) else {
            continue;
        };
        result.participating += 1;
        if value > 0.0 {
            result.positive += 1;
        } else if value < 0.0 {
            result.negative += 1;
        }
    }

    result.vote = match result.positive.cmp(&result.negative) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    };
    result
}

/// Filtered mode needs two blocks with any data; legacy mode needs two
/// blocks that actually took a side.
fn passes_validity_gate(blocks: &BlockVotes, filtered: bool) -> bool {
    if filtered {
        blocks.blocks_with_data() >= 2
    } else {
        blocks.nonzero_blocks() >= 2
    }
}

/// Turn block votes into a position and the number of blocks behind it.
pub fn aggregate_votes(blocks: &BlockVotes) -> (Position, u8) {
    let positive = blocks.positive_blocks();
    let negative = blocks.negative_blocks();
    match positive.cmp(&negative) {
        Ordering::Greater => (Position::Leader, positive),
        Ordering::Less => (Position::Laggard, negative),
        Ordering::Equal => (Position::Follower, positive.max(negative)),
    }
}

fn confidence_score(available_windows: usize, blocks: &BlockVotes, universe_size: u32) -> u8 {
    let availability = available_windows as f64 / Window::all().len() as f64 * 100.0;

    let mixed = blocks.positive_blocks() > 0 && blocks.negative_blocks() > 0;
    let consistency = if mixed {
        70.0
    } else if blocks.blocks_with_data() < 3 {
        40.0
    } else {
        100.0
    };

    let raw = availability * AVAILABILITY_WEIGHT
        + consistency * CONSISTENCY_WEIGHT
        + universe_score(universe_size) * UNIVERSE_WEIGHT;
    round_score(raw)
}

fn universe_score(universe_size: u32) -> f64 {
    match universe_size {
        n if n >= 100 => 100.0,
        n if n >= 50 => 75.0,
        n if n >= 20 => 50.0,
        _ => 25.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominant_horizons_from_codes;

    fn inputs(values: [Option<f64>; 7]) -> RelativePerformanceInputs {
        let mut inputs = RelativePerformanceInputs::default();
        for (window, value) in Window::all().into_iter().zip(values) {
            inputs.set(window, value);
        }
        inputs
    }

    fn all(value: f64) -> RelativePerformanceInputs {
        inputs([Some(value); 7])
    }

    #[test]
    fn test_unanimous_positive_is_leader_with_full_pressure() {
        let result = classify_industry_fit(&all(1.0), None).unwrap();
        assert_eq!(result.position, Position::Leader);
        assert_eq!(result.pressure, 3);
    }

    #[test]
    fn test_unanimous_negative_is_laggard() {
        let result = classify_industry_fit(&all(-2.0), None).unwrap();
        assert_eq!(result.position, Position::Laggard);
        assert_eq!(result.pressure, 3);
    }

    #[test]
    fn test_missing_long_horizon_is_neutral_not_negative() {
        let data = inputs([
            Some(5.0),
            Some(5.0),
            Some(5.0),
            Some(5.0),
            None,
            None,
            None,
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        assert_eq!(result.position, Position::Leader);
        assert_eq!(result.pressure, 2);
        assert_eq!(result.blocks.long.vote, 0);
        assert!(!result.blocks.long.has_data());
    }

    #[test]
    fn test_split_blocks_are_follower() {
        let data = inputs([
            Some(10.0),
            Some(10.0),
            Some(-10.0),
            Some(-10.0),
            Some(-10.0),
            Some(10.0),
            Some(-10.0),
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        assert_eq!(result.position, Position::Follower);
        assert_eq!(result.pressure, 1);
        assert_eq!(result.blocks.short.vote, 1);
        assert_eq!(result.blocks.mid.vote, -1);
        assert_eq!(result.blocks.long.vote, 0);
    }

    #[test]
    fn test_two_negative_blocks_are_laggard() {
        let data = inputs([
            Some(-3.0),
            Some(-1.0),
            Some(-2.0),
            Some(-4.0),
            Some(1.0),
            Some(6.0),
            Some(8.0),
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        assert_eq!(result.position, Position::Laggard);
        assert_eq!(result.pressure, 2);
    }

    #[test]
    fn test_fewer_than_two_voting_blocks_is_none() {
        // Only the short block has data
        let data = inputs([Some(5.0), Some(5.0), None, None, None, None, None]);
        assert!(classify_industry_fit(&data, None).is_none());

        // Three blocks with data but two of them are ties
        let ties = inputs([
            Some(5.0),
            Some(5.0),
            Some(1.0),
            Some(-1.0),
            Some(0.0),
            Some(2.0),
            Some(-2.0),
        ]);
        assert!(classify_industry_fit(&ties, None).is_none());

        assert!(classify_industry_fit(&RelativePerformanceInputs::default(), None).is_none());
    }

    #[test]
    fn test_zero_participates_without_taking_a_side() {
        let data = inputs([
            Some(0.0),
            Some(3.0),
            Some(0.0),
            Some(0.0),
            Some(-1.0),
            Some(0.0),
            Some(0.0),
        ]);
        let blocks = classify_industry_fit_with(
            &data,
            &IfsOptions::default().with_dominant_horizons(Window::all().into_iter().collect()),
        )
        .unwrap()
        .blocks;
        assert_eq!(
            blocks.short,
            BlockVote {
                vote: 1,
                participating: 2,
                positive: 1,
                negative: 0,
            }
        );
        assert_eq!(
            blocks.mid,
            BlockVote {
                vote: -1,
                participating: 3,
                positive: 0,
                negative: 1,
            }
        );
        assert_eq!(
            blocks.long,
            BlockVote {
                vote: 0,
                participating: 2,
                positive: 0,
                negative: 0,
            }
        );
    }

    #[test]
    fn test_full_unanimous_data_has_high_confidence() {
        let result = classify_industry_fit(&all(4.0), None).unwrap();
        // 100 * 0.4 + 100 * 0.4 + 75 * 0.2
        assert_eq!(result.confidence, 95);
        assert!(result.confidence >= 80);
        assert_eq!(result.confidence_label, ConfidenceLabel::High);
        assert_eq!(result.available_windows, 7);
    }

    #[test]
    fn test_full_mixed_data_confidence_range() {
        let data = inputs([
            Some(2.0),
            Some(3.0),
            Some(-1.0),
            Some(-2.0),
            Some(-3.0),
            Some(4.0),
            Some(1.0),
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        // 100 * 0.4 + 70 * 0.4 + 75 * 0.2
        assert_eq!(result.confidence, 83);
        assert!((70..90).contains(&result.confidence));
        assert!(matches!(
            result.confidence_label,
            ConfidenceLabel::High | ConfidenceLabel::Medium
        ));
    }

    #[test]
    fn test_low_block_coverage_confidence() {
        let data = inputs([
            Some(5.0),
            Some(5.0),
            Some(5.0),
            Some(5.0),
            None,
            None,
            None,
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        // 4/7 * 100 * 0.4 + 40 * 0.4 + 75 * 0.2 = 53.86
        assert_eq!(result.confidence, 54);
        assert_eq!(result.confidence_label, ConfidenceLabel::Medium);
        assert_eq!(
            result.interpretation,
            "Leader with 2/3 blocks supporting (Medium confidence)"
        );
    }

    #[test]
    fn test_mixed_signal_outranks_low_block_coverage() {
        // Short up, mid down, long block empty
        let data = inputs([
            Some(5.0),
            Some(5.0),
            Some(-5.0),
            Some(-5.0),
            None,
            None,
            None,
        ]);
        let result = classify_industry_fit(&data, None).unwrap();
        assert_eq!(result.position, Position::Follower);
        assert_eq!(result.pressure, 1);
        assert_eq!(result.blocks.blocks_with_data(), 2);
        // 4/7 * 100 * 0.4 + 70 * 0.4 + 75 * 0.2 = 65.86
        assert_eq!(result.confidence, 66);
        assert_eq!(result.confidence_label, ConfidenceLabel::Medium);
    }

    #[test]
    fn test_universe_size_tiers() {
        let data = all(1.0);
        let at = |size| {
            classify_industry_fit_with(
                &data,
                &IfsOptions::default().with_sector_universe_size(size),
            )
            .unwrap()
            .confidence
        };
        assert_eq!(at(150), 100);
        assert_eq!(at(100), 100);
        assert_eq!(at(50), 95);
        assert_eq!(at(20), 90);
        assert_eq!(at(5), 85);
    }

    #[test]
    fn test_dominant_horizons_exclude_windows_with_data() {
        // Short block is strongly negative but not a dominant horizon
        let data = inputs([
            Some(-9.0),
            Some(-9.0),
            Some(3.0),
            Some(2.0),
            Some(1.0),
            Some(4.0),
            Some(-4.0),
        ]);
        let horizons = dominant_horizons_from_codes(["6M", "1Y", "2Y", "3Y", "5Y"]);
        let result = classify_industry_fit(&data, Some(&horizons)).unwrap();

        assert_eq!(result.blocks.short.participating, 0);
        assert_eq!(result.position, Position::Leader);
        assert_eq!(result.pressure, 1);
        // Availability still counts every window with data
        assert_eq!(result.available_windows, 7);
        // Short block has no participating data: 100 * 0.4 + 40 * 0.4 + 15
        assert_eq!(result.confidence, 71);

        let legacy = classify_industry_fit(&data, None).unwrap();
        assert_eq!(legacy.position, Position::Follower);
    }

    #[test]
    fn test_filtered_mode_accepts_structurally_valid_ties() {
        // Two blocks with data, both tied: legacy rejects, filtered accepts
        let data = inputs([
            Some(1.0),
            Some(-1.0),
            Some(0.0),
            None,
            None,
            None,
            None,
        ]);
        assert!(classify_industry_fit(&data, None).is_none());

        let horizons: HashSet<Window> = Window::all().into_iter().collect();
        let result = classify_industry_fit(&data, Some(&horizons)).unwrap();
        assert_eq!(result.position, Position::Follower);
        assert_eq!(result.pressure, 0);
    }

    #[test]
    fn test_filtered_mode_needs_two_blocks_with_data() {
        let data = all(5.0);
        let horizons = dominant_horizons_from_codes(["1M", "3M", "YTD"]);
        assert!(classify_industry_fit(&data, Some(&horizons)).is_none());

        let empty = HashSet::new();
        assert!(classify_industry_fit(&data, Some(&empty)).is_none());
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = classify_industry_fit(&all(1.0), None).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["position"], "leader");
        assert_eq!(json["pressure"], 3);
        assert_eq!(json["confidence_label"], "High");
        assert_eq!(json["blocks"]["mid"]["participating"], 3);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let data = inputs([
            Some(1.5),
            None,
            Some(-0.5),
            Some(2.0),
            Some(0.0),
            Some(-3.0),
            None,
        ]);
        let first = classify_industry_fit(&data, None);
        let second = classify_industry_fit(&data, None);
        assert_eq!(first, second);
    }
}
