//! bigram-overlap similarity between quotes.
//!
//! scores are the Sørensen–Dice coefficient over the character bigrams of both
//! strings, compared case-insensitively. bigrams are counted as a multiset, so a
//! bigram repeated in one string only matches as many times as it appears in the
//! other.

use std::collections::HashMap;

fn bigrams(text: &str) -> HashMap<String, usize> {
    let chars: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    let mut grams = HashMap::new();

    match chars.len() {
        0 => {}
        1 => {
            grams.insert(chars[0].to_string(), 1);
        }
        _ => {
            for pair in chars.windows(2) {
                *grams.entry(pair.iter().collect::<String>()).or_insert(0) += 1;
            }
        }
    }

    grams
}

/// similarity of `a` and `b` in `[0, 1]`. identical strings score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let grams_a = bigrams(a);
    let grams_b = bigrams(b);

    let total: usize = grams_a.values().sum::<usize>() + grams_b.values().sum::<usize>();
    if total == 0 {
        return 0.0;
    }

    let common: usize = grams_a
        .iter()
        .map(|(gram, count)| grams_b.get(gram).map_or(0, |other| (*count).min(*other)))
        .sum();

    2.0 * common as f64 / total as f64
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    /// whether any entry scored at or above the threshold.
    pub any_above: bool,
    /// every corpus entry with its score, in corpus order.
    pub scored: Vec<(i64, f64)>,
    /// the first entry with the highest score at or above the threshold.
    pub best_id: Option<i64>,
    threshold: f64,
}

impl Ranking {
    pub fn best_score(&self) -> Option<f64> {
        let best = self.best_id?;
        self.scored
            .iter()
            .find(|(id, _)| *id == best)
            .map(|(_, score)| *score)
    }

    /// ids scoring at or above the threshold, best first. ties keep corpus order.
    pub fn top(&self, n: usize) -> Vec<i64> {
        let mut above: Vec<(i64, f64)> = self
            .scored
            .iter()
            .copied()
            .filter(|(_, score)| *score >= self.threshold)
            .collect();

        above.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        above.into_iter().take(n).map(|(id, _)| id).collect()
    }
}

/// scores `candidate` against every entry of `corpus`.
pub fn rank_against<'a, I>(candidate: &str, corpus: I, threshold: f64) -> Ranking
where
    I: IntoIterator<Item = (i64, &'a str)>,
{
    let mut ranking = Ranking {
        threshold,
        ..Default::default()
    };
    let mut best_score = f64::NEG_INFINITY;

    for (id, text) in corpus {
        let score = similarity(candidate, text);

        if score >= threshold {
            ranking.any_above = true;

            if score > best_score {
                best_score = score;
                ranking.best_id = Some(id);
            }
        }

        ranking.scored.push((id, score));
    }

    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        for text in ["A very simple text", "é", "", "hello hello hello"] {
            assert_eq!(similarity(text, text), 1.0, "{text:?}");
        }
    }

    #[test]
    fn similarity_is_symmetric() {
        let samples = [
            ("A very simple quote", "A simple quote"),
            ("Je n'étais pas là", "J'etais pas la"),
            ("hello", "Hello My Old Friend !"),
            ("a", ""),
            ("abc", "cba"),
        ];

        for (a, b) in samples {
            assert_eq!(similarity(a, b), similarity(b, a), "{a:?} / {b:?}");
        }
    }

    #[test]
    fn comparison_ignores_case() {
        assert_eq!(similarity("HELLO WORLD", "hello world"), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("a", "b"), 0.0);
        assert_eq!(similarity("a", ""), 0.0);
        assert_eq!(similarity("the cat sat", "tac eht"), 0.0);
    }

    #[test]
    fn repeated_bigrams_only_match_once_per_occurrence() {
        // "aaaa" has three "aa", "aa" has one.
        assert!((similarity("aaaa", "aa") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn known_scores() {
        assert!((similarity("A very simple quote", "A simple quote") - 26.0 / 31.0).abs() < 1e-9);
        assert!((similarity("Hello there", "hello world") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn detects_near_duplicates() {
        let threshold = 0.6;
        let samples: [(&str, &[&str], bool); 11] = [
            (
                "A very simple text",
                &["A very simple text", "with another message"],
                true,
            ),
            (
                "A very simple quote",
                &["A simple quote", "there is a missing word"],
                true,
            ),
            (
                "A quote among others",
                &[
                    "I love to quote people",
                    "The sun is a star among others",
                    "I love art !",
                ],
                false,
            ),
            (
                "I miss my book",
                &["I miss my colleagues", "They are so fun"],
                false,
            ),
            ("I miss my computer", &["I miss my contuter"], true),
            (
                "I miss my computer, I forgot it at my house and I'm sad now",
                &["I forgot it at my house and I'm sad now"],
                true,
            ),
            (
                "hello",
                &[
                    "I said hello to my brother, but he didn't answer",
                    "I named my dog \"Hello\"",
                    "Hello My Old Friend !",
                ],
                false,
            ),
            ("Je n'étais pas là", &["J'etais pas la"], true),
            (
                "A: 'raconte un truc marrant'\nB: 'clash A de façon énervée'",
                &["'clash A de façon énervée'"],
                true,
            ),
            (
                "Une quote en français avec des caractères un peu spéciaux: il en faut",
                &[
                    "d'autres quotes qui n'ont rien à voir",
                    "une autre, mais pareil, aucun rapport",
                ],
                false,
            ),
            (
                "Une quote en français avec des caractères un peu spéciaux: il en faut",
                &[
                    "Une citation en français avec des caractères un peu spéciaux: y en faut",
                    "une autre, mais pareil, aucun rapport",
                ],
                true,
            ),
        ];

        for (input, existing, expected) in samples {
            let corpus = existing
                .iter()
                .enumerate()
                .map(|(idx, text)| (idx as i64 + 1, *text));
            let ranking = rank_against(input, corpus, threshold);

            assert_eq!(ranking.any_above, expected, "{input:?}");
            assert_eq!(ranking.best_id.is_some(), expected, "{input:?}");
        }
    }

    #[test]
    fn best_id_is_the_highest_score_above_threshold() {
        let corpus = [
            (101, "I miss my colleagues"),
            (102, "I miss my computer"),
            (103, "I miss my contuter"),
        ];

        let ranking = rank_against("I miss my computer", corpus, 0.45);

        assert!(ranking.any_above);
        assert_eq!(ranking.best_id, Some(102));
        assert_eq!(ranking.best_score(), Some(1.0));
        assert_eq!(ranking.scored.len(), 3);
        assert_eq!(
            ranking.scored.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![101, 102, 103]
        );
    }

    #[test]
    fn nothing_above_threshold_has_no_best() {
        let ranking = rank_against("hello", [(1, "completely unrelated")], 0.45);

        assert!(!ranking.any_above);
        assert_eq!(ranking.best_id, None);
        assert_eq!(ranking.best_score(), None);
        assert!(ranking.top(5).is_empty());
    }

    #[test]
    fn top_sorts_by_score_and_keeps_corpus_order_on_ties() {
        let corpus = [
            (1, "hello world"),
            (2, "a totally unrelated remark"),
            (3, "Hello World!"),
            (4, "HELLO WORLD"),
            (5, "hello world"),
        ];

        let ranking = rank_against("hello world", corpus, 0.1);

        assert_eq!(ranking.top(10), vec![1, 4, 5, 3, 2]);
        assert_eq!(ranking.top(2), vec![1, 4]);
    }
}
