use thiserror::Error;

use crate::registry::FieldRegistry;
use crate::state::SelectionState;
use crate::validation::Field;

/// WhatsApp number the package request is sent to, digits only.
pub const PACKAGE_RECIPIENT: &str = "905436461502";

/// Canned quick-contact messages offered next to the contact form. The
/// display text for each id is owned by the hosting UI's translation layer.
pub const QUICK_MESSAGE_IDS: &[&str] = &["quote", "info", "meeting", "support"];

/// A selection id could not be resolved to a display label. Raw ids are
/// never emitted into the outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("no display label for {0}")]
    Unresolved(Field),
}

/// Renders the collected selections into the WhatsApp message block, with
/// every id resolved to its display label. Fixed order: category, services,
/// budget, timeline, optional additional info, then the contact fields.
pub fn synthesize(state: &SelectionState, registry: &FieldRegistry) -> Result<String, SynthesisError> {
    let category = state
        .service_category()
        .ok_or(SynthesisError::Unresolved(Field::ServiceCategory))?;

    let mut service_labels = Vec::with_capacity(state.selected_services().len());
    for id in state.selected_services() {
        let label = registry
            .service_label(category, id)
            .ok_or(SynthesisError::Unresolved(Field::SelectedServices))?;
        service_labels.push(label);
    }

    let budget = state
        .budget()
        .and_then(|id| registry.budget_label(id))
        .ok_or(SynthesisError::Unresolved(Field::Budget))?;
    let timeline = state
        .timeline()
        .and_then(|id| registry.timeline_label(id))
        .ok_or(SynthesisError::Unresolved(Field::Timeline))?;

    let mut message = format!(
        "*New Custom Package Request*\n\
         *Category:* {}\n\
         *Selected Services:* {}\n\
         *Budget:* {}\n\
         *Timeline:* {}\n",
        registry.category_label(category),
        service_labels.join(", "),
        budget,
        timeline,
    );
    if !state.additional_info().trim().is_empty() {
        message.push_str(&format!("*Additional Info:* {}\n", state.additional_info()));
    }
    message.push_str(&format!(
        "\n*Contact Details:*\n\
         *Name:* {}\n\
         *Email:* {}\n\
         *Phone:* {}",
        state.name(),
        state.email(),
        state.phone(),
    ));
    Ok(message)
}

/// Builds the deep link that pre-fills `message` in a chat with
/// `recipient`. Opening the URL is the caller's business.
pub fn whatsapp_url(recipient: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", recipient, urlencoding::encode(message))
}

/// Synthesis and encoding in one step; what the summary step submits.
pub fn package_request_link(
    state: &SelectionState,
    registry: &FieldRegistry,
    recipient: &str,
) -> Result<String, SynthesisError> {
    Ok(whatsapp_url(recipient, &synthesize(state, registry)?))
}
