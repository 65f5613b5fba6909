//! osrs_quests — quest records from Old School RuneScape wiki markup
//!
//! This crate turns the raw wiki text of quest pages into typed
//! [`QuestRecord`]s. It finds the `Infobox Quest` and `Quest details`
//! templates on a page, normalizes their fields (difficulty codes, lengths,
//! image URLs, release dates) and runs the free-text requirements block
//! through a line classifier that separates prerequisite quests, skill
//! levels, quest point thresholds and miscellaneous notes.
//!
//! Basic example (no-run):
//!
//! ```rust,no_run
//! use osrs_quests::{KnownTitles, build};
//!
//! let known: KnownTitles = ["Cook's Assistant"].into_iter().collect();
//! let record = build(
//!     "Demon Slayer",
//!     "{{Quest details|difficulty=1|requirements=*[[Cook's Assistant]]}}",
//!     &known,
//! );
//! println!("{}", record.to_value().unwrap());
//! ```

pub mod builder;
pub mod catalog;
pub mod error;
pub mod markup;
pub mod model;
pub mod normalize;
pub mod requirements;
pub mod text;

pub use crate::builder::{build, quest_id};
pub use crate::catalog::{build_all, export_all, load_wiki_text, quest_titles};
pub use crate::error::*;
pub use crate::model::*;
pub use crate::requirements::{KnownTitles, ParsedRequirements, parse_requirements};
