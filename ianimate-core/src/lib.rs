#![doc = "ianimate-core: selection and time-matching engine for ianimate."]

//! This crate contains all logic for building time-ordered animation
//! frame lists: synoptic-hour canonicalization, time array building,
//! pattern matching, greedy time-file matching, structured archive
//! search, the selection orchestrator, and the external encoder
//! collaborators. The `ianimate` binary crate is CLI glue over this.

pub mod archive;
pub mod contract;
pub mod encode;
pub mod logfile;
pub mod matching;
pub mod params;
pub mod pattern;
pub mod pipeline;
pub mod select;
pub mod timebase;
