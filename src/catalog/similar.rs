use crate::catalog::types::{CatalogItem, ItemId};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Rank candidates by how many genres they share with the reference.
///
/// Candidates with no genres or no overlap are dropped, as is the reference
/// itself. Order is by shared-genre count, then year, both descending; ties
/// beyond that keep no particular order. Each returned item carries its
/// `similarity_score`.
pub fn rank_by_genres(
    reference_id: &ItemId,
    reference_genres: &[i64],
    candidates: Vec<CatalogItem>,
    limit: usize,
) -> Vec<CatalogItem> {
    let reference: HashSet<i64> = reference_genres.iter().copied().collect();
    if reference.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, CatalogItem)> = candidates
        .into_iter()
        .filter(|candidate| &candidate.id != reference_id)
        .filter_map(|candidate| {
            let genres: HashSet<i64> = candidate.genre_ids().into_iter().collect();
            let score = genres.intersection(&reference).count();
            (score > 0).then_some((score, candidate))
        })
        .collect();

    scored.sort_by_key(|(score, item)| Reverse((*score, item.year.unwrap_or(0))));

    scored
        .into_iter()
        .take(limit)
        .map(|(score, mut item)| {
            item.similarity_score = Some(score);
            item
        })
        .collect()
}
