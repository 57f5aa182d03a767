use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level service categories offered on the package page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Software,
    Agency,
    Consulting,
}

impl ServiceCategory {
    pub fn all() -> &'static [ServiceCategory] {
        &[
            ServiceCategory::Software,
            ServiceCategory::Agency,
            ServiceCategory::Consulting,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ServiceCategory::Software => "software",
            ServiceCategory::Agency => "agency",
            ServiceCategory::Consulting => "consulting",
        }
    }

    pub fn from_id(id: &str) -> Option<ServiceCategory> {
        match id {
            "software" => Some(ServiceCategory::Software),
            "agency" => Some(ServiceCategory::Agency),
            "consulting" => Some(ServiceCategory::Consulting),
            _ => None,
        }
    }
}

/// One selectable option with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub id: &'static str,
    pub label: &'static str,
}

const SOFTWARE_SERVICES: &[ChoiceOption] = &[
    ChoiceOption { id: "web-development", label: "Web Development" },
    ChoiceOption { id: "mobile-app", label: "Mobile App Development" },
    ChoiceOption { id: "e-commerce", label: "E-Commerce" },
    ChoiceOption { id: "custom-software", label: "Custom Software" },
    ChoiceOption { id: "cms", label: "CMS Solutions" },
    ChoiceOption { id: "api-integration", label: "API Integration" },
];

const AGENCY_SERVICES: &[ChoiceOption] = &[
    ChoiceOption { id: "branding", label: "Branding" },
    ChoiceOption { id: "ui-ux", label: "UI/UX Design" },
    ChoiceOption { id: "digital-marketing", label: "Digital Marketing" },
    ChoiceOption { id: "content-creation", label: "Content Creation" },
];

const CONSULTING_SERVICES: &[ChoiceOption] = &[
    ChoiceOption { id: "business-strategy", label: "Business Strategy" },
    ChoiceOption { id: "tech-consulting", label: "Technology Consulting" },
    ChoiceOption { id: "digital-transformation", label: "Digital Transformation" },
    ChoiceOption { id: "product-management", label: "Product Management" },
    ChoiceOption { id: "market-research", label: "Market Research" },
];

const BUDGET_RANGES: &[ChoiceOption] = &[
    ChoiceOption { id: "under-5k", label: "Under $5,000" },
    ChoiceOption { id: "5k-10k", label: "$5,000 - $10,000" },
    ChoiceOption { id: "10k-25k", label: "$10,000 - $25,000" },
    ChoiceOption { id: "25k-50k", label: "$25,000 - $50,000" },
    ChoiceOption { id: "over-50k", label: "Over $50,000" },
    ChoiceOption { id: "not-sure", label: "Not sure yet" },
];

const TIMELINE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { id: "asap", label: "As soon as possible" },
    ChoiceOption { id: "within-1-month", label: "Within 1 month" },
    ChoiceOption { id: "1-3-months", label: "1-3 months" },
    ChoiceOption { id: "3-6-months", label: "3-6 months" },
    ChoiceOption { id: "flexible", label: "Flexible" },
];

/// Static catalog of categories, their dependent services and the budget
/// and timeline bands. Built once as an explicit two-level mapping so an
/// unknown id is a detectable `None` rather than a silently wrong lookup.
pub struct FieldRegistry {
    services: HashMap<ServiceCategory, &'static [ChoiceOption]>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        let mut services = HashMap::new();
        services.insert(ServiceCategory::Software, SOFTWARE_SERVICES);
        services.insert(ServiceCategory::Agency, AGENCY_SERVICES);
        services.insert(ServiceCategory::Consulting, CONSULTING_SERVICES);
        FieldRegistry { services }
    }

    pub fn category_label(&self, category: ServiceCategory) -> &'static str {
        match category {
            ServiceCategory::Software => "Software Development",
            ServiceCategory::Agency => "Creative Agency",
            ServiceCategory::Consulting => "Consulting",
        }
    }

    pub fn services_for(&self, category: ServiceCategory) -> &'static [ChoiceOption] {
        self.services.get(&category).copied().unwrap_or(&[])
    }

    pub fn service_label(&self, category: ServiceCategory, id: &str) -> Option<&'static str> {
        lookup(self.services_for(category), id)
    }

    pub fn budget_options(&self) -> &'static [ChoiceOption] {
        BUDGET_RANGES
    }

    pub fn timeline_options(&self) -> &'static [ChoiceOption] {
        TIMELINE_OPTIONS
    }

    pub fn budget_label(&self, id: &str) -> Option<&'static str> {
        lookup(BUDGET_RANGES, id)
    }

    pub fn timeline_label(&self, id: &str) -> Option<&'static str> {
        lookup(TIMELINE_OPTIONS, id)
    }

    pub fn is_valid_service(&self, category: ServiceCategory, id: &str) -> bool {
        self.service_label(category, id).is_some()
    }

    pub fn is_valid_budget(&self, id: &str) -> bool {
        self.budget_label(id).is_some()
    }

    pub fn is_valid_timeline(&self, id: &str) -> bool {
        self.timeline_label(id).is_some()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(options: &'static [ChoiceOption], id: &str) -> Option<&'static str> {
    options.iter().find(|option| option.id == id).map(|option| option.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_lookup_is_scoped_to_category() {
        let registry = FieldRegistry::new();
        assert_eq!(
            registry.service_label(ServiceCategory::Software, "web-development"),
            Some("Web Development")
        );
        // branding belongs to agency, not software
        assert_eq!(registry.service_label(ServiceCategory::Software, "branding"), None);
        assert!(registry.is_valid_service(ServiceCategory::Agency, "branding"));
    }

    #[test]
    fn test_budget_and_timeline_lookups() {
        let registry = FieldRegistry::new();
        assert_eq!(registry.budget_label("5k-10k"), Some("$5,000 - $10,000"));
        assert_eq!(registry.timeline_label("asap"), Some("As soon as possible"));
        assert_eq!(registry.budget_label("bogus"), None);
        assert_eq!(registry.timeline_label(""), None);
    }

    #[test]
    fn test_category_ids_round_trip() {
        for category in ServiceCategory::all() {
            assert_eq!(ServiceCategory::from_id(category.id()), Some(*category));
        }
        assert_eq!(ServiceCategory::from_id("marketing"), None);
    }

    #[test]
    fn test_every_category_has_services() {
        let registry = FieldRegistry::new();
        for category in ServiceCategory::all() {
            assert!(!registry.services_for(*category).is_empty());
        }
    }
}
