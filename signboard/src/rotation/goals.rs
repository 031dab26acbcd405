//! Goals paginator.
//!
//! A single cursor walks the goals list two entries at a time on a
//! fixed-period timer.  For an odd-length list the `+2 (mod len)` step
//! lands on odd offsets after the first wrap, so the cursor visits every
//! residue and returns to 0 after `len` advancements; a wrapped page pairs
//! the last and first goals.

use crate::config::Goal;

/// Goals shown per page.
pub const GOALS_PAGE_SIZE: usize = 2;

/// Cursor into the goals list.  Starts at 0.
#[derive(Debug, Default)]
pub struct GoalsPager {
    cursor: usize,
}

impl GoalsPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Timer-expiry transition.  `goals_len` is re-read each firing; an
    /// empty list leaves the machine idle.
    pub fn advance(&mut self, goals_len: usize) {
        if goals_len == 0 {
            return;
        }
        self.cursor = (self.cursor + GOALS_PAGE_SIZE) % goals_len;
    }

    /// Page currently on screen: the goal at the cursor and its successor.
    ///
    /// A one-entry list yields a single goal — the wraparound would pair
    /// the entry with itself, and the duplicate is dropped rather than
    /// shown twice.
    pub fn page<'a>(&self, goals: &'a [Goal]) -> Vec<&'a Goal> {
        if goals.is_empty() {
            return Vec::new();
        }
        // Re-anchor a cursor left beyond the end of a shrunk list.
        let first = self.cursor % goals.len();
        let second = (first + 1) % goals.len();

        let mut page = vec![&goals[first]];
        if second != first {
            page.push(&goals[second]);
        }
        page
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(n: usize) -> Vec<Goal> {
        (0..n)
            .map(|i| Goal {
                id: i.to_string(),
                text: format!("goal-{i}"),
            })
            .collect()
    }

    fn ids(page: &[&Goal]) -> Vec<String> {
        page.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    fn even_list_returns_to_zero_after_half_the_length() {
        // len 10: 0, 2, 4, 6, 8, 0, 2, …
        let mut pager = GoalsPager::new();
        let mut cursors = vec![pager.cursor()];
        for _ in 0..6 {
            pager.advance(10);
            cursors.push(pager.cursor());
        }
        assert_eq!(cursors, vec![0, 2, 4, 6, 8, 0, 2]);
    }

    #[test]
    fn odd_list_visits_every_residue_before_returning() {
        // len 5: the wrap lands on odd offsets, so the full tour is len
        // advancements long.
        let mut pager = GoalsPager::new();
        let mut cursors = Vec::new();
        for _ in 0..5 {
            pager.advance(5);
            cursors.push(pager.cursor());
        }
        assert_eq!(cursors, vec![2, 4, 1, 3, 0]);
    }

    #[test]
    fn page_holds_cursor_and_successor() {
        let list = goals(4);
        let mut pager = GoalsPager::new();
        assert_eq!(ids(&pager.page(&list)), vec!["0", "1"]);

        pager.advance(list.len());
        assert_eq!(ids(&pager.page(&list)), vec!["2", "3"]);
    }

    #[test]
    fn wrapped_page_pairs_last_and_first() {
        let list = goals(5);
        let mut pager = GoalsPager::new();
        pager.advance(5);
        pager.advance(5);
        assert_eq!(pager.cursor(), 4);
        assert_eq!(ids(&pager.page(&list)), vec!["4", "0"]);
    }

    #[test]
    fn single_goal_is_shown_once_not_twice() {
        let list = goals(1);
        let pager = GoalsPager::new();
        assert_eq!(ids(&pager.page(&list)), vec!["0"]);
    }

    #[test]
    fn empty_list_stays_idle() {
        let mut pager = GoalsPager::new();
        pager.advance(0);
        pager.advance(0);
        assert_eq!(pager.cursor(), 0);
        assert!(pager.page(&goals(0)).is_empty());
    }

    #[test]
    fn cursor_past_a_shrunk_list_is_reanchored_for_display() {
        let mut pager = GoalsPager::new();
        for _ in 0..3 {
            pager.advance(10); // cursor → 6
        }
        assert_eq!(pager.cursor(), 6);

        let short = goals(4);
        assert_eq!(ids(&pager.page(&short)), vec!["2", "3"]);

        // The next advance re-reads the new length and realigns the cursor.
        pager.advance(short.len());
        assert_eq!(pager.cursor(), 0);
    }
}
