/*!
2D kinematic character controller.

A fixed-timestep mover for platformer characters that owns its own physics:
grounding detection, gravity integration, surface sliding, and jump control,
resolved against an injected shape-cast capability instead of a physics
engine's rigid-body step.

Layers, bottom to top:
- [`collision`]:  shape-cast types and the [`collision::CollisionQuery`]
  capability, with a parry2d-backed [`collision::StaticWorld`] backend
- [`body`]:       the Grounded/Airborne state machine ticked at a fixed rate
- [`controller`]: locomotion driver (move axis, jump buffering, coyote time,
  variable jump height)
- [`animator`]:   presentation bridge sampling velocity/state into parameters
- [`clock`]:      fixed-timestep accumulator for hosts with variable frame rates
- [`config`]:     tuning structs, RON-loadable, validated before construction
*/

pub mod animator;
pub mod body;
pub mod clock;
pub mod collision;
pub mod config;
pub mod controller;

pub use animator::{AnimatorBridge, ParamId, ParamRegistry, ParameterSink};
pub use body::{Actuator, BodyState, KinematicBody, StepResult};
pub use clock::TickClock;
pub use collision::{
    CapsuleSpec, CollisionHit, CollisionQuery, StaticShape, StaticWorld, Transform, Vec2,
};
pub use config::{BodyTuning, ControllerTuning, Tuning};
pub use controller::{CharacterController, InputEvent};
