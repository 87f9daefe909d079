/// A plurality counter over observed subclass tags: a small counting map,
/// not a true ordered multiset. The winner is the tag with the highest
/// count; ties go to whichever tag was first observed.
#[derive(Debug, Clone)]
pub struct SubclassTally {
    // Insertion order doubles as the tie-break order.
    counts: Vec<(String, usize)>,
}

impl SubclassTally {
    #[must_use]
    pub fn new(first_tag: impl Into<String>) -> Self {
        Self {
            counts: vec![(first_tag.into(), 1)],
        }
    }

    pub fn observe(&mut self, tag: &str) {
        if let Some(entry) = self.counts.iter_mut().find(|(t, _)| t == tag) {
            entry.1 += 1;
        } else {
            self.counts.push((tag.to_string(), 1));
        }
    }

    #[must_use]
    pub fn plurality(&self) -> &str {
        // `Iterator::max_by_key` returns the *last* maximal element on ties;
        // we need the first-observed one, so fold manually.
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.counts {
            best = match best {
                Some(current) if entry.1 <= current.1 => Some(current),
                _ => Some(entry),
            };
        }
        best.map(|(tag, _)| tag.as_str())
            .expect("at least one tag is always observed at construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_first_observed() {
        let mut tally = SubclassTally::new("sedan");
        tally.observe("truck");
        assert_eq!(tally.plurality(), "sedan");
    }

    #[test]
    fn plurality_winner_by_count() {
        let mut tally = SubclassTally::new("sedan");
        tally.observe("truck");
        tally.observe("truck");
        assert_eq!(tally.plurality(), "truck");
    }
}
