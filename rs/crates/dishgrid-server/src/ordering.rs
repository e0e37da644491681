//! Card ordering: which records become cards and in what order they appear
//! in a grid of a given width.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::records::Record;

/// How display order is assigned. Selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingStrategy {
    /// Position among displayable records.
    Natural,
    /// Per-width order hint from the dataset; index in the full record
    /// sequence for widths without a hint.
    #[default]
    Hint,
    /// Natural order laid out along the anti-diagonals of the grid.
    Diagonal,
}

impl OrderingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Hint => "hint",
            Self::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natural" => Ok(Self::Natural),
            "hint" => Ok(Self::Hint),
            "diagonal" => Ok(Self::Diagonal),
            _ => Err(ConfigError::Invalid {
                key: "ORDERING_STRATEGY",
                value: s.to_string(),
            }),
        }
    }
}

/// 1-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card<'a> {
    pub record: &'a Record,
    pub order: i64,
    pub image_source: String,
    /// Only set by [`OrderingStrategy::Diagonal`].
    pub position: Option<GridPosition>,
}

/// Cards for every displayable record, sorted by order (descending when
/// `reversed`). The sort is stable in both directions.
pub fn build_cards<'a>(
    records: &'a [Record],
    strategy: OrderingStrategy,
    columns: usize,
    reversed: bool,
    image_base: &str,
) -> Vec<Card<'a>> {
    let mut cards: Vec<Card<'a>> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_displayable())
        .enumerate()
        .map(|(shown, (index, record))| {
            let order = match strategy {
                OrderingStrategy::Natural => shown as i64,
                OrderingStrategy::Hint => record.order_hint(columns).unwrap_or(index as i64),
                OrderingStrategy::Diagonal => shown as i64 + 1,
            };
            Card {
                record,
                order,
                image_source: resolve_image_source(image_base, &record.image_link),
                position: None,
            }
        })
        .collect();

    if reversed {
        cards.sort_by(|a, b| b.order.cmp(&a.order));
    } else {
        cards.sort_by_key(|card| card.order);
    }

    if strategy == OrderingStrategy::Diagonal {
        let rows = row_count(cards.len(), columns);
        for (card, position) in cards.iter_mut().zip(diagonal_positions(rows, columns)) {
            card.position = Some(position);
        }
    }

    cards
}

/// Rows needed for `cards` cards in `columns` columns.
pub fn row_count(cards: usize, columns: usize) -> usize {
    if cards == 0 || columns == 0 {
        return 0;
    }
    cards.div_ceil(columns)
}

/// Slots of a `rows` x `cols` grid in anti-diagonal sweep order: diagonals
/// advance from the top-left corner, each one walked top to bottom.
pub fn diagonal_positions(rows: usize, cols: usize) -> Vec<GridPosition> {
    let mut slots = Vec::with_capacity(rows * cols);
    if rows == 0 || cols == 0 {
        return slots;
    }
    for diagonal in 0..rows + cols - 1 {
        let first_row = diagonal.saturating_sub(cols - 1);
        let last_row = diagonal.min(rows - 1);
        for row in first_row..=last_row {
            slots.push(GridPosition {
                row: row + 1,
                col: diagonal - row + 1,
            });
        }
    }
    slots
}

/// Join the configured image base and a record's image link.
pub fn resolve_image_source(base: &str, link: &str) -> String {
    let absolute = ["http://", "https://", "//"]
        .iter()
        .any(|scheme| link.starts_with(scheme));
    if base.is_empty() || absolute {
        return link.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [OrderingStrategy; 3] = [
        OrderingStrategy::Natural,
        OrderingStrategy::Hint,
        OrderingStrategy::Diagonal,
    ];

    fn record(country: &str, image: &str, hints: [i64; 3]) -> Record {
        Record {
            country: country.to_string(),
            both: 25.0,
            national_dish: format!("{} dish", country),
            dish_wiki: String::new(),
            image_link: image.to_string(),
            aspect_ratio: 1.0,
            order_2_cols: hints[0],
            order_3_cols: hints[1],
            order_4_cols: hints[2],
        }
    }

    fn countries<'a>(cards: &[Card<'a>]) -> Vec<&'a str> {
        cards.iter().map(|c| c.record.country.as_str()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("A", "a.jpg", [4, 1, 2]),
            record("B", "", [9, 9, 9]),
            record("C", "c.jpg", [2, 3, 2]),
            record("D", "d.jpg", [1, 2, 1]),
            record("E", "e.jpg", [3, 3, 4]),
            record("F", "", [0, 0, 0]),
            record("G", "g.jpg", [5, 1, 3]),
        ]
    }

    #[test]
    fn test_hint_example() {
        let records = vec![
            record("five", "five.jpg", [5, 0, 0]),
            record("none", "", [3, 0, 0]),
            record("one", "one.jpg", [1, 0, 0]),
        ];
        let cards = build_cards(&records, OrderingStrategy::Hint, 2, false, "");
        assert_eq!(countries(&cards), vec!["one", "five"]);
        assert_eq!(cards[0].order, 1);
        assert_eq!(cards[1].order, 5);
    }

    #[test]
    fn test_only_displayable_and_sorted() {
        let records = sample();
        for strategy in STRATEGIES {
            for columns in 1..=4 {
                for reversed in [false, true] {
                    let cards = build_cards(&records, strategy, columns, reversed, "/img");
                    assert_eq!(cards.len(), 5);
                    assert!(cards.iter().all(|c| !c.record.image_link.is_empty()));
                    let sorted = cards.windows(2).all(|w| {
                        if reversed {
                            w[0].order >= w[1].order
                        } else {
                            w[0].order <= w[1].order
                        }
                    });
                    assert!(sorted, "{strategy} cols={columns} rev={reversed}");
                }
            }
        }
    }

    #[test]
    fn test_hint_fallback_uses_record_index() {
        let records = sample();
        let cards = build_cards(&records, OrderingStrategy::Hint, 1, false, "");
        let orders: Vec<i64> = cards.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 2, 3, 4, 6]);
    }

    #[test]
    fn test_natural_uses_displayable_index() {
        let records = sample();
        let cards = build_cards(&records, OrderingStrategy::Natural, 3, true, "");
        let orders: Vec<i64> = cards.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![4, 3, 2, 1, 0]);
        assert_eq!(countries(&cards), vec!["G", "E", "D", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_record_order() {
        let records = sample();
        // 3 cols: A=1, G=1, D=2, C=3, E=3
        let forward = build_cards(&records, OrderingStrategy::Hint, 3, false, "");
        assert_eq!(countries(&forward), vec!["A", "G", "D", "C", "E"]);
        let reversed = build_cards(&records, OrderingStrategy::Hint, 3, true, "");
        assert_eq!(countries(&reversed), vec!["C", "E", "D", "A", "G"]);
    }

    #[test]
    fn test_row_count() {
        for columns in 1..=4 {
            assert_eq!(row_count(0, columns), 0);
        }
        assert_eq!(row_count(1, 4), 1);
        assert_eq!(row_count(4, 4), 1);
        assert_eq!(row_count(5, 4), 2);
        assert_eq!(row_count(7, 3), 3);
        assert_eq!(row_count(7, 1), 7);
        assert_eq!(row_count(3, 0), 0);
    }

    #[test]
    fn test_diagonal_positions_4x4() {
        let slots: Vec<(usize, usize)> = diagonal_positions(4, 4)
            .into_iter()
            .map(|p| (p.row, p.col))
            .collect();
        assert_eq!(
            slots,
            vec![
                (1, 1), (1, 2), (2, 1), (1, 3), (2, 2), (3, 1), (1, 4), (2, 3),
                (3, 2), (4, 1), (2, 4), (3, 3), (4, 2), (3, 4), (4, 3), (4, 4),
            ]
        );
        assert_eq!(diagonal_positions(4, 4), diagonal_positions(4, 4));
    }

    #[test]
    fn test_diagonal_positions_non_square() {
        let slots = diagonal_positions(2, 3);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], GridPosition { row: 1, col: 1 });
        assert_eq!(slots[5], GridPosition { row: 2, col: 3 });
        assert!(diagonal_positions(0, 4).is_empty());
    }

    #[test]
    fn test_diagonal_cards() {
        let records: Vec<Record> = (0..16)
            .map(|i| record(&format!("r{i}"), "x.jpg", [0, 0, 0]))
            .collect();
        let cards = build_cards(&records, OrderingStrategy::Diagonal, 4, false, "");
        assert_eq!(cards[0].order, 1);
        assert_eq!(cards[0].position, Some(GridPosition { row: 1, col: 1 }));
        assert_eq!(cards[1].position, Some(GridPosition { row: 1, col: 2 }));
        assert_eq!(cards[2].position, Some(GridPosition { row: 2, col: 1 }));
        assert_eq!(cards[15].position, Some(GridPosition { row: 4, col: 4 }));

        let other = build_cards(&records, OrderingStrategy::Hint, 4, false, "");
        assert!(other.iter().all(|c| c.position.is_none()));
    }

    #[test]
    fn test_resolve_image_source() {
        assert_eq!(resolve_image_source("", "a.jpg"), "a.jpg");
        assert_eq!(resolve_image_source("/static/img/", "a.jpg"), "/static/img/a.jpg");
        assert_eq!(resolve_image_source("https://cdn.example.com", "/a.jpg"), "https://cdn.example.com/a.jpg");
        assert_eq!(resolve_image_source("/static", "https://img.example.com/a.jpg"), "https://img.example.com/a.jpg");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("natural".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Natural));
        assert_eq!(" Hint ".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Hint));
        assert_eq!("DIAGONAL".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Diagonal));
        assert!("spiral".parse::<OrderingStrategy>().is_err());
        assert_eq!(OrderingStrategy::default().to_string(), "hint");
    }
}
