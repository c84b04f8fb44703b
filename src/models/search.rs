use crate::docker::SearchResult;
use crate::ui::columns::Column;

use super::ListRow;

pub const SEARCH_COLUMNS: &[Column] = &[
    Column::new("NAME", 0.2, 0.3),
    Column::new("STARS", 0.1, 0.1),
    Column::new("OFFICIAL", 0.1, 0.1),
    Column::new("DESCRIPTION", 0.2, 0.5),
];

/// One Docker Hub hit in the search overlay
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    pub name: String,
    pub stars: i64,
    pub official: bool,
    pub description: String,
}

impl SearchRow {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            name: result.name.clone(),
            stars: result.stars,
            official: result.official,
            description: result.description.clone(),
        }
    }
}

impl ListRow for SearchRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.stars.to_string(),
            if self.official { "[OK]" } else { "" }.to_string(),
            self.description.clone(),
        ]
    }

    fn filter_label(&self) -> String {
        self.name.clone()
    }
}
