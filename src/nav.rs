//! Directional selection over icons laid out in rings.

use eframe::egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    // Offset lies inside a cone around the direction: twice as wide as deep
    fn accepts(self, dx: f32, dy: f32) -> bool {
        match self {
            Direction::Left => dx < 0.0 && dy.abs() < dx.abs() * 2.0,
            Direction::Right => dx > 0.0 && dy.abs() < dx.abs() * 2.0,
            Direction::Up => dy < 0.0 && dx.abs() < dy.abs() * 2.0,
            Direction::Down => dy > 0.0 && dx.abs() < dy.abs() * 2.0,
        }
    }

    fn step_back(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Item to move to from `current`. Falls back to the previous/next index
/// when nothing lies in that direction. `None` when there are no items.
pub fn navigate(centers: &[Pos2], current: usize, dir: Direction) -> Option<usize> {
    let n = centers.len();
    if n == 0 {
        return None;
    }
    let current = current.min(n - 1);
    let from = centers[current];

    let best = centers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != current)
        .filter_map(|(i, p)| {
            let (dx, dy) = (p.x - from.x, p.y - from.y);
            dir.accepts(dx, dy).then_some((i, dx * dx + dy * dy))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i);

    Some(best.unwrap_or(if dir.step_back() {
        (current + n - 1) % n
    } else {
        (current + 1) % n
    }))
}

/// Selected, else hovered, else the first item.
pub fn starting_index(selected: Option<usize>, hovered: Option<usize>) -> usize {
    selected.or(hovered).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn plus() -> Vec<Pos2> {
        // centre, right, left, up, down
        vec![
            pos2(0.0, 0.0),
            pos2(100.0, 0.0),
            pos2(-100.0, 0.0),
            pos2(0.0, -100.0),
            pos2(0.0, 100.0),
        ]
    }

    #[test]
    fn moves_to_the_nearest_item_in_the_direction() {
        let c = plus();
        assert_eq!(navigate(&c, 0, Direction::Right), Some(1));
        assert_eq!(navigate(&c, 0, Direction::Left), Some(2));
        assert_eq!(navigate(&c, 0, Direction::Up), Some(3));
        assert_eq!(navigate(&c, 0, Direction::Down), Some(4));
    }

    #[test]
    fn prefers_the_closer_candidate() {
        let c = vec![pos2(0.0, 0.0), pos2(300.0, 10.0), pos2(120.0, -40.0)];
        assert_eq!(navigate(&c, 0, Direction::Right), Some(2));
    }

    #[test]
    fn falls_back_to_circular_steps() {
        let c = vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0)];
        // Nothing above or right of the last item
        assert_eq!(navigate(&c, 2, Direction::Right), Some(0));
        assert_eq!(navigate(&c, 0, Direction::Up), Some(2));
        assert_eq!(navigate(&c, 1, Direction::Down), Some(2));
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(navigate(&[], 0, Direction::Left), None);
        assert_eq!(navigate(&[pos2(1.0, 1.0)], 0, Direction::Left), Some(0));
        assert_eq!(starting_index(None, Some(3)), 3);
        assert_eq!(starting_index(Some(1), Some(3)), 1);
        assert_eq!(starting_index(None, None), 0);
    }
}
