//! Industry Fit Score (IFS)
//!
//! Classifies a company as a sector leader, follower or laggard from its
//! relative performance against the sector over seven trailing windows.
//! Windows are grouped into short/mid/long blocks; each block casts one vote
//! and the majority decides the position.

pub mod classifier;
pub mod inputs;
pub mod window;

pub use classifier::{
    classify_industry_fit, classify_industry_fit_with, BlockVote, BlockVotes, IfsOptions,
    IfsResult, Position,
};
pub use inputs::RelativePerformanceInputs;
pub use window::{dominant_horizons_from_codes, Block, Window};
