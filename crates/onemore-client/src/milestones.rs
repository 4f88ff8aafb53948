use std::collections::BTreeMap;

use onemore_core::{ContentItem, ContentKind};

/// Scripted messages shown instead of catalog content at specific
/// interaction counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Milestones(BTreeMap<u64, ContentItem>);

impl Milestones {
    /// Build from `(count, message)` pairs. Ids are assigned `m1`, `m2`, ...
    /// in ascending count order; a repeated count keeps the last message.
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u64, T)>,
        T: Into<String>,
    {
        let texts: BTreeMap<u64, String> = entries
            .into_iter()
            .map(|(count, text)| (count, text.into()))
            .collect();
        Self(
            texts
                .into_iter()
                .enumerate()
                .map(|(i, (count, text))| {
                    (count, ContentItem::new(format!("m{}", i + 1), text, ContentKind::Meta))
                })
                .collect(),
        )
    }

    pub fn standard() -> Self {
        Self::new([
            (5, "Curiosity is a trap."),
            (12, "You can leave anytime."),
            (25, "What are you looking for?"),
            (50, "There is no end."),
            (100, "You enjoy this."),
        ])
    }

    pub fn get(&self, count: u64) -> Option<&ContentItem> {
        self.0.get(&count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standard_table_hits_each_threshold() {
        let milestones = Milestones::standard();
        let expected = [
            (5, "m1", "Curiosity is a trap."),
            (12, "m2", "You can leave anytime."),
            (25, "m3", "What are you looking for?"),
            (50, "m4", "There is no end."),
            (100, "m5", "You enjoy this."),
        ];
        for (count, id, text) in expected {
            let item = milestones.get(count).unwrap();
            assert_eq!(item.id, id);
            assert_eq!(item.text, text);
            assert_eq!(item.kind, ContentKind::Meta);
        }
        assert_eq!(milestones.len(), 5);
    }

    #[test]
    fn other_counts_miss() {
        let milestones = Milestones::standard();
        for count in [0, 1, 4, 6, 13, 99, 101] {
            assert!(milestones.get(count).is_none(), "count {count}");
        }
    }

    #[test]
    fn ids_follow_count_order_not_input_order() {
        let milestones = Milestones::new([(10, "ten"), (2, "two")]);
        assert_eq!(milestones.get(2).unwrap().id, "m1");
        assert_eq!(milestones.get(10).unwrap().id, "m2");
    }
}
