use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::registry::FieldRegistry;
use crate::state::SelectionState;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// The wizard's data fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ServiceCategory,
    SelectedServices,
    Budget,
    Timeline,
    AdditionalInfo,
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::ServiceCategory => "serviceCategory",
            Field::SelectedServices => "selectedServices",
            Field::Budget => "budget",
            Field::Timeline => "timeline",
            Field::AdditionalInfo => "additionalInfo",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error identifiers, resolved to display strings by the hosting UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    TooFew,
    InvalidEmail,
    UnknownOption,
    TooShort,
    TooLong,
}

/// Which registry list an `OneOf` rule is checked against. Service ids are
/// only meaningful within the currently selected category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSet {
    ServicesOfCategory,
    Budgets,
    Timelines,
}

/// A single validation rule. Rules are pure functions over field values;
/// they run in declaration order and the first failure wins, so an empty
/// value reports `Required` rather than a format error on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinItems(usize),
    MinLen(usize),
    MaxLen(usize),
    Email,
    OneOf(OptionSet),
}

pub fn rules_for(field: Field) -> &'static [Rule] {
    match field {
        Field::ServiceCategory => &[Rule::Required],
        Field::SelectedServices => &[Rule::MinItems(1), Rule::OneOf(OptionSet::ServicesOfCategory)],
        Field::Budget => &[Rule::Required, Rule::OneOf(OptionSet::Budgets)],
        Field::Timeline => &[Rule::Required, Rule::OneOf(OptionSet::Timelines)],
        Field::AdditionalInfo => &[],
        Field::Name => &[Rule::Required, Rule::MinLen(2), Rule::MaxLen(200)],
        Field::Email => &[Rule::Required, Rule::Email],
        Field::Phone => &[Rule::Required, Rule::MinLen(5), Rule::MaxLen(32)],
    }
}

/// Validates the given fields against the current state. An empty map means
/// everything passed. Pure; neither the state nor the registry is touched.
pub fn validate(
    fields: &[Field],
    state: &SelectionState,
    registry: &FieldRegistry,
) -> BTreeMap<Field, ErrorKind> {
    let mut errors = BTreeMap::new();
    for field in fields {
        if let Some(kind) = check_field(*field, state, registry) {
            errors.insert(*field, kind);
        }
    }
    errors
}

fn check_field(field: Field, state: &SelectionState, registry: &FieldRegistry) -> Option<ErrorKind> {
    for rule in rules_for(field) {
        let failure = match rule {
            Rule::Required => check_required(field, state),
            Rule::MinItems(min) => check_min_items(field, state, *min),
            Rule::MinLen(min) => check_min_len(field, state, *min),
            Rule::MaxLen(max) => check_max_len(field, state, *max),
            Rule::Email => check_email(state),
            Rule::OneOf(set) => check_one_of(*set, state, registry),
        };
        if failure.is_some() {
            return failure;
        }
    }
    None
}

fn text_value<'a>(field: Field, state: &'a SelectionState) -> Option<&'a str> {
    match field {
        Field::AdditionalInfo => Some(state.additional_info()),
        Field::Name => Some(state.name()),
        Field::Email => Some(state.email()),
        Field::Phone => Some(state.phone()),
        Field::Budget => state.budget(),
        Field::Timeline => state.timeline(),
        Field::ServiceCategory | Field::SelectedServices => None,
    }
}

fn check_required(field: Field, state: &SelectionState) -> Option<ErrorKind> {
    let empty = match field {
        Field::ServiceCategory => state.service_category().is_none(),
        Field::SelectedServices => state.selected_services().is_empty(),
        _ => text_value(field, state).map_or(true, |value| value.trim().is_empty()),
    };
    empty.then_some(ErrorKind::Required)
}

fn check_min_items(field: Field, state: &SelectionState, min: usize) -> Option<ErrorKind> {
    if field == Field::SelectedServices && state.selected_services().len() < min {
        return Some(ErrorKind::TooFew);
    }
    None
}

fn check_min_len(field: Field, state: &SelectionState, min: usize) -> Option<ErrorKind> {
    let value = text_value(field, state)?;
    (value.trim().chars().count() < min).then_some(ErrorKind::TooShort)
}

fn check_max_len(field: Field, state: &SelectionState, max: usize) -> Option<ErrorKind> {
    let value = text_value(field, state)?;
    (value.trim().chars().count() > max).then_some(ErrorKind::TooLong)
}

fn check_email(state: &SelectionState) -> Option<ErrorKind> {
    (!EMAIL_RE.is_match(state.email().trim())).then_some(ErrorKind::InvalidEmail)
}

fn check_one_of(set: OptionSet, state: &SelectionState, registry: &FieldRegistry) -> Option<ErrorKind> {
    let valid = match set {
        OptionSet::ServicesOfCategory => match state.service_category() {
            Some(category) => state
                .selected_services()
                .iter()
                .all(|id| registry.is_valid_service(category, id)),
            // without a category there is no service list to belong to
            None => false,
        },
        OptionSet::Budgets => state.budget().map_or(false, |id| registry.is_valid_budget(id)),
        OptionSet::Timelines => state.timeline().map_or(false, |id| registry.is_valid_timeline(id)),
    };
    (!valid).then_some(ErrorKind::UnknownOption)
}
