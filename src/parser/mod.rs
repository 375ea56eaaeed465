//! Text passes between the decoder and the field extractors.

mod layout;
mod options;
mod sections;
mod table_detector;

pub use layout::{LayoutReconstructor, LayoutThresholds, Transition};
pub use options::{ErrorMode, ParseOptions};
pub use sections::{step, OpenSection, ScannedLine, SectionSegmenter, SegmentState, Segmentation};
pub use table_detector::{TableDetector, TableDetectorConfig};

pub(crate) use table_detector::is_bullet_marker;
