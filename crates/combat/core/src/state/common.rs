use core::fmt;

/// Identifier of an actor, unique only within the tick that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Map cell coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in cells.
    pub fn distance(self, other: Position) -> f32 {
        let (dx, dy) = self.delta(other);
        (dx as f64).hypot(dy as f64) as f32
    }

    /// Moves `steps` cells along the direction towards `target`.
    ///
    /// Never overshoots: if the target is closer than `steps`, the target
    /// itself is returned.
    pub fn step_toward(self, target: Position, steps: f32) -> Position {
        let distance = self.distance(target);
        if distance <= steps || distance == 0.0 {
            return target;
        }
        let (dx, dy) = self.delta(target);
        self.offset_along(dx, dy, steps)
    }

    /// Moves `steps` cells directly away from `threat`.
    ///
    /// When standing on the threat itself there is no direction to flee
    /// along, so the step is taken along +x.
    pub fn step_away(self, threat: Position, steps: f32) -> Position {
        let (dx, dy) = threat.delta(self);
        if dx == 0 && dy == 0 {
            return self.offset_along(1, 0, steps);
        }
        self.offset_along(dx, dy, steps)
    }

    /// Rotates the vector `self -> point` by 90 degrees around `self`.
    pub fn rotate_quarter(self, point: Position, clockwise: bool) -> Position {
        let (dx, dy) = self.delta(point);
        let (rx, ry) = if clockwise { (dy, -dx) } else { (-dy, dx) };
        Position::saturating(i64::from(self.x) + rx, i64::from(self.y) + ry)
    }

    /// Integer centroid of a set of positions, `None` for an empty set.
    pub fn centroid<I>(positions: I) -> Option<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        let (mut sx, mut sy, mut n) = (0i64, 0i64, 0i64);
        for p in positions {
            sx += i64::from(p.x);
            sy += i64::from(p.y);
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Position::new(
            (sx as f64 / n as f64).round() as i32,
            (sy as f64 / n as f64).round() as i32,
        ))
    }

    /// Vector `self -> other`, widened so no coordinate pair can overflow.
    fn delta(self, other: Position) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }

    /// Clamps wide coordinates onto the `i32` grid.
    fn saturating(x: i64, y: i64) -> Position {
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Position::new(clamp(x), clamp(y))
    }

    fn offset_along(self, dx: i64, dy: i64, steps: f32) -> Position {
        let len = (dx as f64).hypot(dy as f64);
        let steps = f64::from(steps);
        let ox = (dx as f64 / len * steps).round() as i64;
        let oy = (dy as f64 / len * steps).round() as i64;
        Position::saturating(i64::from(self.x) + ox, i64::from(self.y) + oy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer resource meter (HP, SP) with `current <= maximum`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into `[0, maximum]`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current over maximum; an unknown maximum counts as full.
    pub fn fraction(&self) -> f32 {
        if self.maximum == 0 {
            1.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }

    /// Missing amount (`maximum - current`).
    pub fn deficit(&self) -> u32 {
        self.maximum - self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.maximum > 0 && self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_current() {
        let meter = ResourceMeter::new(150, 100);
        assert_eq!(meter.current, 100);
        assert_eq!(meter.fraction(), 1.0);
        assert_eq!(ResourceMeter::new(0, 0).fraction(), 1.0);
        assert_eq!(ResourceMeter::new(25, 100).deficit(), 75);
    }

    #[test]
    fn step_away_increases_distance() {
        let me = Position::new(5, 5);
        let threat = Position::new(3, 5);
        let next = me.step_away(threat, 4.0);
        assert_eq!(next, Position::new(9, 5));
        assert!(next.distance(threat) > me.distance(threat));
    }

    #[test]
    fn step_away_from_own_cell_uses_fixed_axis() {
        let me = Position::new(2, 2);
        assert_eq!(me.step_away(me, 3.0), Position::new(5, 2));
    }

    #[test]
    fn step_toward_does_not_overshoot() {
        let me = Position::ORIGIN;
        assert_eq!(me.step_toward(Position::new(2, 0), 5.0), Position::new(2, 0));
        assert_eq!(me.step_toward(Position::new(10, 0), 3.0), Position::new(3, 0));
    }

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert_eq!(Position::centroid(Vec::new()), None);
        assert_eq!(
            Position::centroid([Position::new(0, 0), Position::new(4, 2)]),
            Some(Position::new(2, 1))
        );
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let far_west = Position::new(i32::MIN, 0);
        let far_east = Position::new(i32::MAX, 0);
        assert!(far_west.distance(far_east) > 4.0e9);

        let me = Position::ORIGIN;
        assert_eq!(me.step_toward(Position::new(50_000, 0), 3.0), Position::new(3, 0));
        assert_eq!(far_east.step_away(far_west, 10.0), far_east);
        assert_eq!(
            far_east.rotate_quarter(far_west, false),
            Position::new(i32::MAX, i32::MIN)
        );
        assert_eq!(far_west.step_toward(far_east, 7.0), Position::new(i32::MIN + 7, 0));
    }

    #[test]
    fn quarter_rotation() {
        let me = Position::ORIGIN;
        assert_eq!(me.rotate_quarter(Position::new(3, 0), false), Position::new(0, 3));
        assert_eq!(me.rotate_quarter(Position::new(3, 0), true), Position::new(0, -3));
    }
}
