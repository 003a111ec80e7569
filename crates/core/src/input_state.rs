//! Per-frame input sampling
//!
//! Frontends record key events into an [`InputState`] whenever they arrive;
//! the session drains it exactly once per tick. Discrete actions are
//! edge-triggered (a press is consumed once, repeats within one frame
//! collapse), while soft drop is level-triggered and stays on until released.

/// Edge-triggered actions consumed by the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Left,
    Right,
    Down,
    Rotate,
}

impl Press {
    /// Order in which presses of one frame are applied
    pub const ORDER: [Press; 4] = [Press::Left, Press::Right, Press::Down, Press::Rotate];

    fn bit(self) -> u8 {
        match self {
            Press::Left => 1 << 0,
            Press::Right => 1 << 1,
            Press::Down => 1 << 2,
            Press::Rotate => 1 << 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pressed: u8,
    soft_drop_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, press: Press) {
        self.pressed |= press.bit();
    }

    pub fn is_pressed(&self, press: Press) -> bool {
        self.pressed & press.bit() != 0
    }

    /// Remove and report a press.
    pub fn consume(&mut self, press: Press) -> bool {
        let had = self.is_pressed(press);
        self.pressed &= !press.bit();
        had
    }

    /// Take every pending press in application order, leaving the set empty.
    pub fn drain(&mut self) -> impl Iterator<Item = Press> {
        let pressed = std::mem::take(&mut self.pressed);
        Press::ORDER
            .into_iter()
            .filter(move |p| pressed & p.bit() != 0)
    }

    pub fn set_soft_drop(&mut self, held: bool) {
        self.soft_drop_held = held;
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn has_pending(&self) -> bool {
        self.pressed != 0
    }

    /// Forget presses but keep the soft drop level.
    pub fn discard_presses(&mut self) {
        self.pressed = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
