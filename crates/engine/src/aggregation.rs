//! Shopping list aggregation.
//!
//! Ingredient lines coming from every recipe in a shopping list are folded
//! into one line per `(name, unit)` pair, summing the amounts. Lines keep the
//! order in which their key was first seen.

use indexmap::IndexMap;

/// One ingredient line as read from the shopping list recipes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientLine {
    pub name: String,
    pub unit: String,
    pub amount: i32,
}

/// A summed shopping list line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedLine {
    pub name: String,
    pub unit: String,
    pub total: i64,
}

impl AggregatedLine {
    /// Text shown in the exported document, e.g. `"Sugar: 150 g"`.
    pub fn label(&self) -> String {
        format!("{}: {} {}", self.name, self.total, self.unit)
    }
}

/// Sum `lines` by `(name, unit)`.
///
/// The returned iterator yields each key once, in first-seen order. It is a
/// single pass over the folded lines.
pub fn aggregate<I>(lines: I) -> impl Iterator<Item = AggregatedLine>
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut totals: IndexMap<(String, String), i64> = IndexMap::new();
    for line in lines {
        *totals.entry((line.name, line.unit)).or_insert(0) += i64::from(line.amount);
    }

    totals
        .into_iter()
        .map(|((name, unit), total)| AggregatedLine { name, unit, total })
}
