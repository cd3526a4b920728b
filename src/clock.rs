/*!
Fixed-timestep scheduling for the kinematic body.

The body itself only ever sees a fixed `dt`; this module turns variable frame
time into a whole number of fixed ticks. Frame time is clamped before
accumulation so a long stall doesn't trigger a catch-up spiral of ticks.
*/

/// Default body tick frequency (Hz).
pub const TICK_HZ: u32 = 50;

/// Max frame time (seconds) fed into the accumulator per advance.
///
/// Frames longer than this (editor pauses, debugger stops, load hitches) are
/// clamped rather than simulated, keeping movement responsive after stalls.
pub const MAX_FRAME_DT_S: f32 = 0.10;

/// Accumulates variable frame time into fixed simulation ticks.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    fixed_dt: f32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_HZ)
    }
}

impl TickClock {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            fixed_dt: 1.0 / tick_hz.max(1) as f32,
            max_frame_dt: MAX_FRAME_DT_S,
            accumulator: 0.0,
        }
    }

    /// Override the stall clamp.
    pub fn with_max_frame_dt(mut self, max_frame_dt: f32) -> Self {
        self.max_frame_dt = max_frame_dt.max(0.0);
        self
    }

    /// The fixed timestep handed to every body tick (seconds).
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Feed one frame's elapsed time; returns how many fixed ticks to run now.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        ticks
    }
}
