pub mod analyzer;
pub mod classifier;
pub mod exporter;
pub mod parser;
pub mod subject_detector;

pub use analyzer::{analyze, Statistics};
pub use classifier::QuestionClassifier;
pub use exporter::CsvExporter;
pub use parser::{DropCounts, Extraction, LengthBounds, StructuralParser};
