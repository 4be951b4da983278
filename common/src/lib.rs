//! First-Aid Kit Tracker Common Library
//!
//! CLIとWeb(WASM)で共有される型、ビュー投影エンジン、ユーティリティ

pub mod types;
pub mod error;
pub mod status;
pub mod collation;
pub mod grouping;
pub mod ranking;
pub mod sorting;
pub mod projection;
pub mod collapse;
pub mod payload;
pub mod routes;
pub mod validation;

pub use types::{AggregateItem, CatalogEntry, KitItem, Projectable, UNCATEGORIZED};
pub use error::{Error, Result, ValidationError};
pub use status::{classify, ExpiryStatus, EXPIRES_SOON_WINDOW_DAYS};
pub use collation::locale_cmp;
pub use grouping::{display_category, group, GroupedItems};
pub use ranking::rank;
pub use sorting::{sort, SortConfig, SortKey, SortOrder};
pub use projection::{project, CategorySection, StatusSummary};
pub use collapse::CollapseState;
pub use payload::{error_detail, parse_aggregate, parse_items, status_error, QuantityUpdate, Snapshot};
pub use routes::Route;
pub use validation::{NewCatalogEntryForm, NewItemForm};
