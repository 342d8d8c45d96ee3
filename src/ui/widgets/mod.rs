//! Custom ratatui widgets

pub mod step_track;

pub use step_track::StepTrack;
