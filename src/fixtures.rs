//! Small problems shared by the unit tests.

use crate::error::SearchError;
use crate::problem::{Problem, Transition};
use std::collections::HashSet;

pub type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    North,
    South,
    East,
    West,
}

impl Move {
    const ALL: [Move; 4] = [Move::East, Move::North, Move::West, Move::South];

    fn offset(self) -> (i32, i32) {
        match self {
            Move::North => (0, 1),
            Move::South => (0, -1),
            Move::East => (1, 0),
            Move::West => (-1, 0),
        }
    }
}

/// 4-connected grid with unit step cost.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub start: Cell,
    pub goal: Cell,
    pub walls: HashSet<Cell>,
}

impl Grid {
    pub fn open(width: i32, height: i32, start: Cell, goal: Cell) -> Self {
        Self {
            width,
            height,
            start,
            goal,
            walls: HashSet::new(),
        }
    }

    pub fn with_walls(mut self, walls: &[Cell]) -> Self {
        self.walls.extend(walls.iter().copied());
        self
    }

    pub fn manhattan(&self) -> impl Fn(&Cell) -> f64 + Copy + Send + Sync {
        let goal = self.goal;
        move |&(x, y): &Cell| ((x - goal.0).abs() + (y - goal.1).abs()) as f64
    }

    fn free(&self, (x, y): Cell) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height && !self.walls.contains(&(x, y))
    }

    fn target(&self, m: Move, (x, y): Cell) -> Option<Cell> {
        let (dx, dy) = m.offset();
        let next = (x + dx, y + dy);
        self.free(next).then_some(next)
    }
}

impl Problem for Grid {
    type State = Cell;
    type Action = Move;

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn applicable_actions(&self, state: &Cell) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|m| self.target(*m, *state).is_some())
            .collect()
    }

    fn resulting_states(&self, action: &Move, state: &Cell) -> Result<Vec<Cell>, SearchError> {
        self.target(*action, *state)
            .map(|next| vec![next])
            .ok_or_else(|| SearchError::inapplicable(action, state))
    }

    fn transition(&self, action: &Move, state: &Cell, _next: &Cell) -> Result<Transition, SearchError> {
        self.target(*action, *state)
            .map(|_| Transition::deterministic(1.0))
            .ok_or_else(|| SearchError::inapplicable(action, state))
    }

    fn is_solution(&self, state: &Cell) -> bool {
        *state == self.goal
    }
}

/// Ring of `n` states with a single "advance" action and no goal.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub n: usize,
}

impl Cycle {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Problem for Cycle {
    type State = usize;
    type Action = ();

    fn initial_state(&self) -> usize {
        0
    }

    fn applicable_actions(&self, state: &usize) -> Vec<()> {
        if *state < self.n {
            vec![()]
        } else {
            Vec::new()
        }
    }

    fn resulting_states(&self, action: &(), state: &usize) -> Result<Vec<usize>, SearchError> {
        if *state >= self.n {
            return Err(SearchError::inapplicable(action, state));
        }
        Ok(vec![(state + 1) % self.n])
    }

    fn transition(&self, action: &(), state: &usize, _next: &usize) -> Result<Transition, SearchError> {
        if *state >= self.n {
            return Err(SearchError::inapplicable(action, state));
        }
        Ok(Transition::deterministic(1.0))
    }

    fn is_solution(&self, _state: &usize) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pick {
    Take,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sack {
    pub next: usize,
    pub room: u32,
}

/// 0/1 knapsack as a minimisation: the path cost is the value left behind.
#[derive(Debug, Clone)]
pub struct Knapsack {
    pub items: Vec<(u32, u32)>,
    pub capacity: u32,
}

impl Knapsack {
    pub fn new(items: &[(u32, u32)], capacity: u32) -> Self {
        Self {
            items: items.to_vec(),
            capacity,
        }
    }

    pub fn total_value(&self) -> f64 {
        self.items.iter().map(|&(_, v)| v as f64).sum()
    }

    /// Admissible estimate of the value still to be left behind: remaining
    /// value minus the fractional-relaxation optimum.
    pub fn relaxation(&self) -> impl Fn(&Sack) -> f64 + Clone + Send + Sync + '_ {
        move |sack: &Sack| {
            let mut rest: Vec<(u32, u32)> = self.items[sack.next..].to_vec();
            let remaining: f64 = rest.iter().map(|&(_, v)| v as f64).sum();
            rest.sort_by(|a, b| {
                let ra = a.1 as f64 / a.0 as f64;
                let rb = b.1 as f64 / b.0 as f64;
                rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut room = sack.room as f64;
            let mut packed = 0.0;
            for (w, v) in rest {
                if room <= 0.0 {
                    break;
                }
                let share = (room / w as f64).min(1.0);
                packed += share * v as f64;
                room -= share * w as f64;
            }
            (remaining - packed).max(0.0)
        }
    }

    /// Best total value by enumerating every subset.
    pub fn brute_force_best(&self) -> u32 {
        let n = self.items.len();
        (0u32..(1 << n))
            .filter_map(|mask| {
                let (w, v) = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .fold((0, 0), |(w, v), i| (w + self.items[i].0, v + self.items[i].1));
                (w <= self.capacity).then_some(v)
            })
            .max()
            .unwrap_or(0)
    }

    fn fits(&self, action: Pick, sack: &Sack) -> bool {
        sack.next < self.items.len()
            && (action == Pick::Skip || self.items[sack.next].0 <= sack.room)
    }
}

impl Problem for Knapsack {
    type State = Sack;
    type Action = Pick;

    fn initial_state(&self) -> Sack {
        Sack {
            next: 0,
            room: self.capacity,
        }
    }

    fn applicable_actions(&self, sack: &Sack) -> Vec<Pick> {
        [Pick::Take, Pick::Skip]
            .into_iter()
            .filter(|a| self.fits(*a, sack))
            .collect()
    }

    fn resulting_states(&self, action: &Pick, sack: &Sack) -> Result<Vec<Sack>, SearchError> {
        if !self.fits(*action, sack) {
            return Err(SearchError::inapplicable(action, sack));
        }
        let room = match action {
            Pick::Take => sack.room - self.items[sack.next].0,
            Pick::Skip => sack.room,
        };
        Ok(vec![Sack {
            next: sack.next + 1,
            room,
        }])
    }

    fn transition(&self, action: &Pick, sack: &Sack, _next: &Sack) -> Result<Transition, SearchError> {
        if !self.fits(*action, sack) {
            return Err(SearchError::inapplicable(action, sack));
        }
        let lost = match action {
            Pick::Take => 0.0,
            Pick::Skip => self.items[sack.next].1 as f64,
        };
        Ok(Transition::deterministic(lost))
    }

    fn is_solution(&self, sack: &Sack) -> bool {
        sack.next == self.items.len()
    }
}

/// Integer line `[-50, 50]` with ±1 moves; `(x - 5)^2` is the usual objective.
#[derive(Debug, Clone)]
pub struct Line;

impl Line {
    pub fn parabola(x: &i32) -> f64 {
        let d = (*x - 5) as f64;
        d * d
    }

    fn inside(x: i32) -> bool {
        (-50..=50).contains(&x)
    }
}

impl Problem for Line {
    type State = i32;
    type Action = i32;

    fn initial_state(&self) -> i32 {
        -30
    }

    fn applicable_actions(&self, x: &i32) -> Vec<i32> {
        [-1, 1].into_iter().filter(|d| Self::inside(x + d)).collect()
    }

    fn resulting_states(&self, d: &i32, x: &i32) -> Result<Vec<i32>, SearchError> {
        if d.abs() != 1 || !Self::inside(x + d) {
            return Err(SearchError::inapplicable(d, x));
        }
        Ok(vec![x + d])
    }

    fn transition(&self, d: &i32, x: &i32, _next: &i32) -> Result<Transition, SearchError> {
        if d.abs() != 1 || !Self::inside(x + d) {
            return Err(SearchError::inapplicable(d, x));
        }
        Ok(Transition::deterministic(1.0))
    }

    fn is_solution(&self, _x: &i32) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Right,
    Left,
}

/// Slippery corridor MDP on `0..=goal`. `Right` advances with probability
/// 0.8 and stays put otherwise; `Left` is deterministic. Every move costs 1.
///
/// With γ = 1 the optimal expected cost from `s` is `1.25 * (goal - s)`.
#[derive(Debug, Clone)]
pub struct Corridor {
    pub goal: usize,
    pub inconsistent: bool,
}

impl Corridor {
    pub fn new(goal: usize) -> Self {
        Self {
            goal,
            inconsistent: false,
        }
    }

    /// Reports a different cost for the "stay" outcome of `Right`.
    pub fn inconsistent(goal: usize) -> Self {
        Self {
            goal,
            inconsistent: true,
        }
    }

    pub fn states(&self) -> Vec<usize> {
        (0..=self.goal).collect()
    }

    fn allowed(&self, step: Step, s: usize) -> bool {
        match step {
            Step::Right => s < self.goal,
            Step::Left => s > 0 && s < self.goal,
        }
    }
}

impl Problem for Corridor {
    type State = usize;
    type Action = Step;

    fn initial_state(&self) -> usize {
        0
    }

    fn applicable_actions(&self, s: &usize) -> Vec<Step> {
        [Step::Right, Step::Left]
            .into_iter()
            .filter(|a| self.allowed(*a, *s))
            .collect()
    }

    fn resulting_states(&self, step: &Step, s: &usize) -> Result<Vec<usize>, SearchError> {
        if !self.allowed(*step, *s) {
            return Err(SearchError::inapplicable(step, s));
        }
        Ok(match step {
            Step::Right => vec![s + 1, *s],
            Step::Left => vec![s - 1],
        })
    }

    fn transition(&self, step: &Step, s: &usize, next: &usize) -> Result<Transition, SearchError> {
        if !self.allowed(*step, *s) {
            return Err(SearchError::inapplicable(step, s));
        }
        Ok(match step {
            Step::Right if next == s => {
                let cost = if self.inconsistent { 2.0 } else { 1.0 };
                Transition::stochastic(cost, 0.2)
            }
            Step::Right => Transition::stochastic(1.0, 0.8),
            Step::Left => Transition::deterministic(1.0),
        })
    }

    fn is_solution(&self, s: &usize) -> bool {
        *s == self.goal
    }
}
