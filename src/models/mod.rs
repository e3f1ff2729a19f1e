pub mod difficulty;
pub mod label;
pub mod loaders;
pub mod question;
pub mod section;
pub mod subject;

pub use difficulty::Difficulty;
pub use label::Label;
pub use loaders::{load_pages, PageDocument};
pub use question::{ParsedQuestion, Question, TagSet};
pub use section::Section;
pub use subject::Subject;
