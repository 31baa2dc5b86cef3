pub mod attributes;
pub mod density;
pub mod filter;
pub mod hull;
pub mod report;

pub use attributes::{AttributeKind, AttributeSummary, summarize_attributes};
pub use density::{DensityFilter, DensitySelection, select_dense_clusters};
pub use filter::{
    FilterParams, FilterSummary, NumericRangeFilter, clusters_with_matches, filter_summary,
    filtered_argument_ids,
};
pub use hull::{Point, convex_hull};
pub use report::{
    AnalysisResult, Argument, ArgumentId, AttributeValue, Cluster, ClusterId, ReportConfig,
    VisualizationConfig,
};
