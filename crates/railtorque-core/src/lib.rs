pub mod analysis;
pub mod document;
pub mod domain;
pub mod extract;
pub mod report;
pub mod service;
pub mod settings;

pub use document::RawDocument;
pub use domain::{
    AlignError, AlignErrorCategory, AlignResult, AlignmentPolicy, AnalysisRecord, AnalysisReport,
    PositionLineRule,
};
pub use service::{analyze_document, analyze_upload, inspect_upload};
pub use settings::AnalysisSettings;
