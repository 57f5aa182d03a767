use serde::{Deserialize, Serialize};

use crate::registry::ServiceCategory;

/// All wizard field values for the current session. Created empty when the
/// wizard mounts and discarded on navigation away or submission; nothing is
/// persisted. Step components read and write through this interface only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    service_category: Option<ServiceCategory>,
    selected_services: Vec<String>,
    budget: Option<String>,
    timeline: Option<String>,
    additional_info: String,
    name: String,
    email: String,
    phone: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_category(&self) -> Option<ServiceCategory> {
        self.service_category
    }

    /// Selects a category. Switching to a different category clears the
    /// service selection, since those ids are only valid within the old
    /// category; re-selecting the current category keeps it.
    pub fn set_category(&mut self, category: ServiceCategory) {
        if self.service_category != Some(category) {
            log::debug!("category changed to {}, clearing selected services", category.id());
            self.selected_services.clear();
        }
        self.service_category = Some(category);
    }

    pub fn selected_services(&self) -> &[String] {
        &self.selected_services
    }

    /// Adds the service if absent, removes it if present.
    pub fn toggle_service(&mut self, id: &str) {
        if let Some(position) = self.selected_services.iter().position(|s| s == id) {
            self.selected_services.remove(position);
        } else {
            self.selected_services.push(id.to_string());
        }
    }

    pub fn budget(&self) -> Option<&str> {
        self.budget.as_deref()
    }

    pub fn set_budget(&mut self, id: &str) {
        self.budget = Some(id.to_string());
    }

    pub fn timeline(&self) -> Option<&str> {
        self.timeline.as_deref()
    }

    pub fn set_timeline(&mut self, id: &str) {
        self.timeline = Some(id.to_string());
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    pub fn set_additional_info(&mut self, text: &str) {
        self.additional_info = text.to_string();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, value: &str) {
        self.name = value.to_string();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, value: &str) {
        self.email = value.to_string();
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = value.to_string();
    }
}
