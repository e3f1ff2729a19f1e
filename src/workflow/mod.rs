pub mod pipeline;

pub use pipeline::{ExamPipeline, ExamReport, SectionReport};
