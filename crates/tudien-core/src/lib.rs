pub mod error;
pub mod location;
pub mod normalize;
pub mod preprocess;
pub mod query;
pub mod service;
pub mod state;

pub use error::ValidationError;
pub use location::{LocationBar, MemoryLocation, ParamMode, SEARCH_PARAM};
pub use normalize::{GroupedEntry, normalize, regroup};
pub use query::LookupQuery;
pub use service::{DictionaryService, ServiceMetadata};
pub use state::{SearchResult, SearchStatus, SessionState};
