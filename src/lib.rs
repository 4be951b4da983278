//! First-Aid Kit Tracker CLI
//!
//! ブラウザ版と同じ投影エンジン（first_aid_common）をターミナルから使う

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;
