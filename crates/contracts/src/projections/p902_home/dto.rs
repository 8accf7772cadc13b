use crate::domain::a001_category::aggregate::Category;
use serde::{Deserialize, Serialize};

/// Read model for the homepage category strip: third-level categories when
/// any exist, otherwise second-level, capped at [`SHOWCASE_LIMIT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub showcase: Vec<Category>,
}

/// At most this many categories are shown on the strip
pub const SHOWCASE_LIMIT: usize = 15;
