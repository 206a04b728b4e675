/*!
 * Test-script analysis.
 *
 * This module turns raw Cypress-style test source into a narration timeline:
 * - `blocks`: balanced-delimiter extraction of named test blocks
 * - `cues`: timed cue emission from titles, comments and action calls
 * - `tables`: built-in translation and explanation tables
 */

pub mod blocks;
pub mod cues;
pub mod tables;

pub use blocks::{Block, extract_blocks};
pub use cues::extract_timeline;
