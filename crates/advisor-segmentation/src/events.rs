//! Diagnostic events emitted by the segmentation algorithms

use std::fmt;
use tracing::debug;

/// Numbered-list cascade stage that produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStage {
    /// Every line starts with its own marker
    LineMarkers,
    /// Markers inline in one run of text
    InlineMarkers,
    /// `1. ... 2. ...` items without periods in their bodies
    DecimalItems,
    /// `가. ...` / `A. ...` items
    AlphaItems,
    /// Split before each decimal marker
    ForcedSplit,
    /// Sentence boundaries
    Sentences,
    /// Fixed-size word chunks
    WordChunks,
    /// Nothing matched; the text is one item
    Whole,
}

impl ListStage {
    /// Position of the stage in the cascade, starting at 1.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::LineMarkers => 1,
            Self::InlineMarkers => 2,
            Self::DecimalItems | Self::AlphaItems => 3,
            Self::ForcedSplit => 4,
            Self::Sentences => 5,
            Self::WordChunks => 6,
            Self::Whole => 7,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineMarkers => "line-markers",
            Self::InlineMarkers => "inline-markers",
            Self::DecimalItems => "decimal-items",
            Self::AlphaItems => "alpha-items",
            Self::ForcedSplit => "forced-split",
            Self::Sentences => "sentences",
            Self::WordChunks => "word-chunks",
            Self::Whole => "whole",
        }
    }
}

impl fmt::Display for ListStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentationEvent {
    /// A numbered-list split finished at `stage` with `items` items.
    ListStage { stage: ListStage, items: usize },
    /// A section split produced `count` sections; `fallback` marks the
    /// single untitled section used when no title was recognized.
    Sections { count: usize, fallback: bool },
}

/// Receiver for segmentation diagnostics
pub trait SegmentationObserver: Send + Sync {
    fn on_event(&self, event: &SegmentationEvent);
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SegmentationObserver for TracingObserver {
    fn on_event(&self, event: &SegmentationEvent) {
        match event {
            SegmentationEvent::ListStage { stage, items } => {
                debug!(stage = %stage, stage_number = stage.number(), items, "Numbered list segmented");
            }
            SegmentationEvent::Sections { count, fallback } => {
                debug!(count, fallback, "Advice sections segmented");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SegmentationObserver for NullObserver {
    fn on_event(&self, _event: &SegmentationEvent) {}
}
