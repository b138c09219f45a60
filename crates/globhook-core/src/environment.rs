//! Screen layout and system input settings reported by the engine.

use crate::native::{NativeEngine, ScreenData};
use serde::{Deserialize, Serialize};

/// Input settings snapshot. A field is `None` when the platform does not
/// report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSettings {
    pub auto_repeat_rate: Option<i64>,
    pub auto_repeat_delay: Option<i64>,
    pub pointer_acceleration_multiplier: Option<i64>,
    pub pointer_acceleration_threshold: Option<i64>,
    pub pointer_sensitivity: Option<i64>,
    pub multi_click_time: Option<i64>,
}

impl InputSettings {
    pub fn query<E: NativeEngine>(engine: &E) -> Self {
        Self {
            auto_repeat_rate: engine.auto_repeat_rate(),
            auto_repeat_delay: engine.auto_repeat_delay(),
            pointer_acceleration_multiplier: engine.pointer_acceleration_multiplier(),
            pointer_acceleration_threshold: engine.pointer_acceleration_threshold(),
            pointer_sensitivity: engine.pointer_sensitivity(),
            multi_click_time: engine.multi_click_time(),
        }
    }
}

/// Read-only view of the input environment through an engine.
pub struct InputEnvironment<E> {
    engine: E,
}

impl<E: NativeEngine> InputEnvironment<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Attached screens, ordered by screen number.
    pub fn screens(&self) -> Vec<ScreenData> {
        let mut screens = self.engine.screen_info();
        screens.sort_by_key(|screen| screen.number);
        screens
    }

    /// The screen containing the origin, falling back to the first one.
    pub fn primary_screen(&self) -> Option<ScreenData> {
        let screens = self.screens();
        screens
            .iter()
            .copied()
            .find(|s| s.x <= 0 && s.y <= 0 && contains_origin(s))
            .or_else(|| screens.first().copied())
    }

    pub fn settings(&self) -> InputSettings {
        InputSettings::query(&self.engine)
    }
}

fn contains_origin(screen: &ScreenData) -> bool {
    i32::from(screen.x) + i32::from(screen.width) > 0
        && i32::from(screen.y) + i32::from(screen.height) > 0
}
