/*!
Presentation-side bridge: samples the body's velocity and state into named
animation parameters each frame.

The bridge holds no simulation state of its own; parameter names are resolved
to ids once, at construction, and the per-frame work is three writes through a
[`ParameterSink`] implemented by the presentation backend.
*/

use crate::body::KinematicBody;

/// Opaque handle for a registered animation parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamId(u32);

/// Interns parameter names so per-frame writes carry ids, not strings.
#[derive(Default)]
pub struct ParamRegistry {
    names: Vec<String>,
}

impl ParamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a parameter name to a stable id, registering it if needed.
    pub fn id(&mut self, name: &str) -> ParamId {
        if let Some(i) = self.names.iter().position(|n| n == name) {
            return ParamId(i as u32);
        }
        self.names.push(name.to_owned());
        ParamId((self.names.len() - 1) as u32)
    }

    pub fn name(&self, id: ParamId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }
}

/// Receives parameter writes; implemented by the presentation backend.
pub trait ParameterSink {
    fn set_float(&mut self, id: ParamId, value: f32);
    fn set_bool(&mut self, id: ParamId, value: bool);
}

/// Reads a body's velocity and state into animation parameters.
pub struct AnimatorBridge {
    run_speed: ParamId,
    vertical_speed: ParamId,
    grounded: ParamId,
}

impl AnimatorBridge {
    pub fn new(registry: &mut ParamRegistry) -> Self {
        Self {
            run_speed: registry.id("run_speed"),
            vertical_speed: registry.id("vertical_speed"),
            grounded: registry.id("grounded"),
        }
    }

    /// Sample `body` into `sink`. Call once per presentation frame.
    pub fn update(&self, body: &KinematicBody, sink: &mut impl ParameterSink) {
        let up = body.up();
        let velocity = body.velocity();
        let vertical = velocity.dot(&up);
        let run = if body.is_grounded() {
            velocity.x.abs()
        } else {
            (velocity - up * vertical).norm()
        };

        sink.set_float(self.run_speed, run);
        sink.set_float(self.vertical_speed, vertical);
        sink.set_bool(self.grounded, body.is_grounded());
    }
}
