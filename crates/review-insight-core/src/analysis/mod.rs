pub mod corpus;
pub mod summary;
pub mod trend;

pub use corpus::label_corpus;
pub use summary::{net_score, LabelShare, SentimentSummary};
pub use trend::{daily_trend, TrendBucket};
