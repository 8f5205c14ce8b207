//! Filter translation to MongoDB query syntax.

use bson::{Document, Bson, doc};

use pickline_core::{
    query::{Filter, QueryVisitor},
    error::DocumentStoreError,
};

use crate::sanitizer::KeySanitizer;


/// Translates a [`Filter`] into a MongoDB filter document.
///
/// A single predicate becomes a plain `{ field: { op: value } }` document; several are
/// wrapped in `$and` so two predicates on the same field never overwrite each other.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error> {
        let mut clauses = filter
            .predicates()
            .iter()
            .map(|predicate| self.visit_predicate(predicate))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match clauses.len() {
            0 => doc! {},
            1 => clauses.remove(0),
            _ => doc! { "$and": clauses },
        })
    }

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        let field = KeySanitizer::sanitize_key(field);

        Ok(doc! {
            field: { "$eq": value.clone() },
        })
    }

    fn visit_starts_with(&mut self, field: &str, prefix: &str) -> Result<Self::Output, Self::Error> {
        let field = KeySanitizer::sanitize_key(field);

        Ok(doc! {
            field: { "$regex": format!("^{}", regex::escape(prefix)) },
        })
    }

    fn visit_range(
        &mut self,
        field: &str,
        min: Option<&Bson>,
        max: Option<&Bson>,
    ) -> Result<Self::Output, Self::Error> {
        let mut bounds = Document::new();

        if let Some(min) = min {
            bounds.insert("$gte", min.clone());
        }
        if let Some(max) = max {
            bounds.insert("$lte", max.clone());
        }

        if bounds.is_empty() {
            return Err(DocumentStoreError::InvalidFilter(format!(
                "range on {field} has no bounds"
            )));
        }

        let field = KeySanitizer::sanitize_key(field);

        Ok(doc! {
            field: bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(filter: &Filter) -> Document {
        MongoQueryTranslator.visit_filter(filter).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(translate(&Filter::all()), doc! {});
    }

    #[test]
    fn single_predicate_is_not_wrapped() {
        assert_eq!(
            translate(&Filter::all().eq("league", "Serie A")),
            doc! { "league": { "$eq": "Serie A" } }
        );
    }

    #[test]
    fn prefix_is_anchored_and_escaped() {
        assert_eq!(
            translate(&Filter::all().starts_with("kickoff_iso", "2024-03-05")),
            doc! { "kickoff_iso": { "$regex": "^2024\\-03\\-05" } }
        );
        assert_eq!(
            translate(&Filter::all().starts_with("kickoff_iso", "2024.*")),
            doc! { "kickoff_iso": { "$regex": "^2024\\.\\*" } }
        );
    }

    #[test]
    fn range_emits_only_supplied_bounds() {
        assert_eq!(
            translate(&Filter::all().range("odds", Some(1.5), None)),
            doc! { "odds": { "$gte": 1.5 } }
        );
        assert_eq!(
            translate(&Filter::all().range("confidence", Some(0), Some(80))),
            doc! { "confidence": { "$gte": 0, "$lte": 80 } }
        );
    }

    #[test]
    fn several_predicates_are_joined_with_and() {
        let filter = Filter::all()
            .eq("league", "Serie A")
            .range("odds", Some(1.5), Some(2.5));
        assert_eq!(
            translate(&filter),
            doc! { "$and": [
                { "league": { "$eq": "Serie A" } },
                { "odds": { "$gte": 1.5, "$lte": 2.5 } },
            ] }
        );
    }
}
