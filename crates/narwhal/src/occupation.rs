//! Horizontal slot occupation.
//!
//! The x axis is cut into slots one pin width wide. While a rank is being placed, the grid holds
//! the slots taken by vertical edge segments that pass through the rank on their way to input pins
//! further down, plus the slots of the nodes already placed in the rank. A node is dropped into the
//! free run of slots closest to where its consumers want it.

use std::fmt::Write as _;

/// Which side of the hint a node would rather end up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The node's right edge lines up with the hint.
    #[default]
    Left,
    /// The node is centered on the hint.
    Center,
    /// The node's left edge lines up with the hint.
    Right,
}

impl Direction {
    fn scans_left(self) -> bool {
        matches!(self, Self::Left | Self::Center)
    }

    fn scans_right(self) -> bool {
        matches!(self, Self::Center | Self::Right)
    }
}

#[derive(Debug, Clone)]
pub struct Occupation {
    slot_width: f64,
    /// Slot `s` lives at `2s` when `s >= 0` and at `-2s - 1` otherwise.
    filled: Vec<bool>,
    min_slot: i64,
    max_slot: i64,
    /// Inclusive slot ranges of the nodes placed since the last [`Self::clear_occupied_nodes`].
    node_occupations: Vec<(i64, i64)>,
}

impl Occupation {
    pub fn new(slot_width: f64) -> Self {
        Self {
            slot_width,
            filled: Vec::new(),
            min_slot: 0,
            max_slot: 0,
            node_occupations: Vec::new(),
        }
    }

    pub fn slot_width(&self) -> f64 {
        self.slot_width
    }

    /// Lowest and highest slot ever touched.
    pub fn slot_bounds(&self) -> (i64, i64) {
        (self.min_slot, self.max_slot)
    }

    pub fn is_occupied(&self, slot: i64) -> bool {
        self.filled.get(slot_index(slot)).copied().unwrap_or(false)
    }

    pub fn position_to_slot(&self, position: f64) -> i64 {
        (position / self.slot_width).floor() as i64
    }

    pub fn slot_to_left_position(&self, slot: i64) -> f64 {
        slot as f64 * self.slot_width
    }

    /// Reserves room for a node `width` wide plus `margin` on each side and returns its x.
    ///
    /// `position` is where the node wants its edge or center to be, as selected by `direction`.
    /// The reservation stays until [`Self::clear_occupied_nodes`].
    pub fn occupy_node(
        &mut self,
        width: f64,
        margin: f64,
        direction: Direction,
        position: f64,
    ) -> f64 {
        let padded = width + 2.0 * margin;
        let hint = position - padded + margin;
        let (first, count) = self.find_space(hint, padded, direction);
        let last = first + count - 1;
        self.set_slot_range(first, last, true);
        self.node_occupations.push((first, last));

        match direction {
            Direction::Left => self.slot_to_left_position(first + count) - width - margin,
            Direction::Right => self.slot_to_left_position(first) + margin,
            Direction::Center => {
                (first as f64 + count as f64 / 2.0) * self.slot_width - width / 2.0
            }
        }
    }

    /// Releases every node reservation made since the previous call.
    pub fn clear_occupied_nodes(&mut self) {
        for (first, last) in std::mem::take(&mut self.node_occupations) {
            self.set_slot_range(first, last, false);
        }
    }

    pub fn occupy_position_range_with_margin(&mut self, from: f64, to: f64, margin: f64) {
        let margin = margin.floor();
        self.occupy_position_range(from - margin, to + margin);
    }

    pub fn clear_position_range_with_margin(&mut self, from: f64, to: f64, margin: f64) {
        let margin = margin.floor();
        self.clear_position_range(from - margin, to + margin);
    }

    /// Marks the slots covering `[from, to)`.
    pub fn occupy_position_range(&mut self, from: f64, to: f64) {
        let (first, last) = (self.position_to_slot(from), self.position_to_slot(to - 1.0));
        self.set_slot_range(first, last, true);
    }

    pub fn clear_position_range(&mut self, from: f64, to: f64) {
        let (first, last) = (self.position_to_slot(from), self.position_to_slot(to - 1.0));
        self.set_slot_range(first, last, false);
    }

    /// Finds a run of free slots at least `width` wide near `position + width / 2`.
    ///
    /// Slots are probed alternately right and left of the center, moving outwards. Each side keeps
    /// a budget of slots it still needs; a free slot spends one (if `direction` lets that side
    /// count), an occupied slot refills it. The first side to run dry wins. When neither side is
    /// preferred and the first `n` probes are all free, the run is centered on the hint.
    ///
    /// Returns the first slot of the run and its length.
    pub fn find_space(&self, position: f64, width: f64, direction: Direction) -> (i64, i64) {
        let needed = ((width / self.slot_width).ceil() as i64).max(1);
        let center = self.position_to_slot(position + width / 2.0);
        let mut left = needed;
        let mut right = needed;
        let mut checked: i64 = 0;

        loop {
            let towards_left = checked % 2 == 1;
            checked += 1;
            let offset = checked >> 1;
            let slot = if towards_left {
                center - offset
            } else {
                center + offset
            };

            if self.is_occupied(slot) {
                if towards_left {
                    left = needed;
                } else {
                    right = needed;
                }
                continue;
            }

            if towards_left {
                if direction.scans_left() {
                    left -= 1;
                }
            } else if direction.scans_right() {
                right -= 1;
            }
            if left == 0 || right == 0 || (left + right == needed && checked == needed) {
                return if towards_left {
                    (slot, needed)
                } else {
                    (slot - needed + 1, needed)
                };
            }
        }
    }

    /// One character per slot from the lowest to the highest touched slot: `*` taken, `|` the free
    /// slot at x = 0, blank otherwise.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for slot in self.min_slot..=self.max_slot {
            let c = if self.is_occupied(slot) {
                '*'
            } else if slot == 0 {
                '|'
            } else {
                ' '
            };
            out.push(c);
        }
        let _ = write!(out, " [{}..={}]", self.min_slot, self.max_slot);
        out
    }

    fn set_slot_range(&mut self, first: i64, last: i64, value: bool) {
        if last < first {
            return;
        }
        for slot in first..=last {
            let index = slot_index(slot);
            if index >= self.filled.len() {
                if !value {
                    continue;
                }
                self.filled.resize(index + 1, false);
            }
            self.filled[index] = value;
        }
        self.min_slot = self.min_slot.min(first);
        self.max_slot = self.max_slot.max(last);
    }
}

fn slot_index(slot: i64) -> usize {
    let magnitude = slot.unsigned_abs() as usize;
    if slot >= 0 {
        magnitude * 2
    } else {
        magnitude * 2 - 1
    }
}
