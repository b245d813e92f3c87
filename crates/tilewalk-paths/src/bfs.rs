use tilewalk_core::Point;

use crate::PathFinder;
use crate::error::PathError;
use crate::finder::NO_PARENT;
use crate::traits::Pather;

impl PathFinder {
    /// Compute the shortest path from `start` to `goal` with a breadth-first
    /// search.
    ///
    /// Every edge has unit weight, so the result has the fewest steps; among
    /// equal-length paths the one found first in the pather's neighbor order
    /// wins. The returned path includes both endpoints. At most
    /// `max_expansions` cells are expanded before giving up with
    /// [`PathError::BudgetExceeded`].
    ///
    /// `start == goal` always yields `[start]`, whatever the budget.
    ///
    /// Unreachability is only proven when the frontier runs dry, or up front
    /// when no cell can step onto the goal. A goal cut off inside a larger
    /// region is reported as [`PathError::NotFound`] only if the budget
    /// covers the start's whole reachable area; otherwise the search ends
    /// with [`PathError::BudgetExceeded`]. Either way no step is taken.
    pub fn find_path<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        goal: Point,
        max_expansions: usize,
    ) -> Result<Vec<Point>, PathError> {
        if start == goal {
            return Ok(vec![start]);
        }
        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            return Err(PathError::NotFound);
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);

        // Only a neighbor of the goal can step onto it. If it has none and
        // the start is not next to it, no budget will help.
        nbuf.clear();
        pather.neighbors(goal, &mut nbuf);
        if nbuf.is_empty() && !start.is_adjacent(goal) {
            self.nbuf = nbuf;
            return Err(PathError::NotFound);
        }

        let cur_gen = self.next_generation();
        self.queue.clear();
        self.nodes[start_idx].generation = cur_gen;
        self.nodes[start_idx].parent = NO_PARENT;
        self.queue.push_back(start_idx);

        let mut expansions = 0;
        let result = loop {
            let Some(ci) = self.queue.pop_front() else {
                break Err(PathError::NotFound);
            };
            if ci == goal_idx {
                break Ok(());
            }
            if expansions >= max_expansions {
                break Err(PathError::BudgetExceeded { expansions });
            }
            expansions += 1;

            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    continue;
                }
                n.generation = cur_gen;
                n.parent = ci;
                self.queue.push_back(ni);
            }
        };

        self.nbuf = nbuf;
        if let Err(err) = result {
            log::trace!("bfs {start} -> {goal}: {err}");
            return Err(err);
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Ok(path)
    }
}
