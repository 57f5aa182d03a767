//! Client-side core for the custom package wizard and quick contact.
//!
//! Holds the form state, the per-step validation schema, the step
//! sequencer and the WhatsApp message synthesis. Rendering is owned by
//! the hosting UI layer; everything in here is pure and synchronous.

pub mod cooldown;
pub mod message;
pub mod registry;
pub mod sequencer;
pub mod state;
pub mod validation;

pub use cooldown::{CooldownActive, SubmitCooldown};
pub use message::{package_request_link, synthesize, whatsapp_url, SynthesisError};
pub use registry::{ChoiceOption, FieldRegistry, ServiceCategory};
pub use sequencer::{JumpRejected, StepDefinition, StepSequencer, ValidationFailure, STEPS};
pub use state::SelectionState;
pub use validation::{validate, ErrorKind, Field};
