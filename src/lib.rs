pub mod api;
pub mod batch;
pub mod config;
pub mod corpus;
pub mod effort;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod layouts;
pub mod scorer;

pub use crate::corpus::{Corpus, CorpusBuilder};
pub use crate::effort::EffortModel;
pub use crate::error::{KeyscopeError, KsResult};
pub use crate::geometry::GeometryTable;
pub use crate::layout::{Layout, LayoutSpec};
pub use crate::scorer::{Analyzer, Metric, MetricReport, MetricValue};
