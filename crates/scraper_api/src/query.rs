/// One `field == value` condition. Criteria sharing a field are ORed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub field: String,
    pub value: String,
}

/// Ordered list of criteria sent to `GET /api/filtered-results/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    criteria: Vec<FilterCriterion>,
}

impl FilterQuery {
    /// One criterion per value, all on `field`, in the order given.
    pub fn any_of<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let criteria = values
            .into_iter()
            .map(|value| FilterCriterion {
                field: field.to_string(),
                value: value.into(),
            })
            .collect();
        Self { criteria }
    }

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Indexed key/value pairs: `filters[i][field]=F`, `filters[i][value]=V`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.criteria.len() * 2);
        for (index, criterion) in self.criteria.iter().enumerate() {
            pairs.push((format!("filters[{index}][field]"), criterion.field.clone()));
            pairs.push((format!("filters[{index}][value]"), criterion.value.clone()));
        }
        pairs
    }
}
