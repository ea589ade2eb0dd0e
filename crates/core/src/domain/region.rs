use serde::Serialize;

use crate::domain::category::Category;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTrends {
    pub category: Category,
    pub trends: Vec<String>,
}

/// One market region and its trend lists, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub categories: Vec<CategoryTrends>,
}

impl Region {
    pub fn trends(&self, category: Category) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.trends.as_slice())
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL.into_iter().filter(|category| self.trends(*category).is_none()).collect()
    }
}

/// Serializes as `{ "technology": [...], "fashion": [...] }` keeping the
/// order categories were declared in.
impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for entry in &self.categories {
            map.serialize_entry(entry.category.as_str(), &entry.trends)?;
        }
        map.end()
    }
}
