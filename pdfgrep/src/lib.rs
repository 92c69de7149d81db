pub mod check;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pdf;
pub mod resolver;
pub mod results;
pub mod search;

pub use config::{CliOverrides, SearchConfig, SearchRequest};
pub use errors::{SearchError, SearchResult};
pub use resolver::{resolve, CandidateKind, FileCandidate, FileResolver};
pub use results::{Location, MatchReport, PageText, SearchSummary};
pub use search::{search, MatchEngine, SearchEvent};
