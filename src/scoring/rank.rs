/// Dense ranks for a list of scores, aligned with the input.
///
/// Higher scores rank first, equal scores share a rank and the next distinct
/// score gets the next integer: `[80, 100, 80, 60]` ranks `[2, 1, 2, 3]`.
pub fn assign_ranks(scores: &[u8]) -> Vec<u32> {
    let mut distinct: Vec<u8> = scores.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    scores
        .iter()
        .map(|score| {
            // distinct is sorted descending, so the position is the count of higher scores
            let higher = distinct.partition_point(|d| d > score);
            higher as u32 + 1
        })
        .collect()
}

/// Order items by rank, keeping input order among equal ranks.
///
/// Returns each item paired with its rank. The sort is stable, so for tied
/// scores the item that came first in the input stays first.
pub fn rank_by_score<T, F>(items: Vec<T>, score_of: F) -> Vec<(T, u32)>
where
    F: Fn(&T) -> u8,
{
    let scores: Vec<u8> = items.iter().map(&score_of).collect();
    let ranks = assign_ranks(&scores);

    let mut ranked: Vec<(T, u32)> = items.into_iter().zip(ranks).collect();
    ranked.sort_by_key(|(_, rank)| *rank);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(assign_ranks(&[]).is_empty());
    }

    #[test]
    fn test_distinct_scores() {
        assert_eq!(assign_ranks(&[40, 100, 60]), vec![3, 1, 2]);
    }

    #[test]
    fn test_ties_share_rank_without_gaps() {
        assert_eq!(assign_ranks(&[100, 80, 80, 60]), vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_all_tied() {
        assert_eq!(assign_ranks(&[60, 60, 60]), vec![1, 1, 1]);
    }

    #[test]
    fn test_three_sixties_below_an_eighty() {
        assert_eq!(assign_ranks(&[60, 60, 80, 60]), vec![2, 2, 1, 2]);
    }

    #[test]
    fn test_rank_order_follows_score_order() {
        let scores = [0, 20, 100, 40, 20, 80, 60, 100];
        let ranks = assign_ranks(&scores);
        for i in 0..scores.len() {
            for j in 0..scores.len() {
                if scores[i] > scores[j] {
                    assert!(ranks[i] < ranks[j]);
                }
                if scores[i] == scores[j] {
                    assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }

    #[test]
    fn test_rank_by_score_is_stable() {
        let items = vec![("a", 60), ("b", 80), ("c", 60), ("d", 60), ("e", 100)];
        let ranked = rank_by_score(items, |(_, score)| *score);
        let order: Vec<(&str, u32)> = ranked.iter().map(|((n, _), r)| (*n, *r)).collect();
        assert_eq!(
            order,
            vec![("e", 1), ("b", 2), ("a", 3), ("c", 3), ("d", 3)]
        );
    }
}
