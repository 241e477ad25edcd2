//! Screens of the checkout flow and the actions that move between them

use serde::Serialize;
use std::fmt;

/// Screen currently presented to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Welcome screen with the "start checkout" action
    #[default]
    Landing,

    /// Payment method tabs, before a method has been confirmed
    MethodSelection,

    /// Method-specific form
    MethodForm,

    /// Payment succeeded
    Confirmation,

    /// Payment failed, retry or cancel
    Error,
}

impl Screen {
    /// Stable machine name
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::MethodSelection => "method_selection",
            Screen::MethodForm => "method_form",
            Screen::Confirmation => "confirmation",
            Screen::Error => "error",
        }
    }

    /// Whether the flow has an edge from `self` to `to`
    ///
    /// Staying on the same screen is not an edge.
    pub fn can_transition_to(self, to: Screen) -> bool {
        matches!(
            (self, to),
            (Screen::Landing, Screen::MethodSelection)
                | (Screen::MethodSelection, Screen::MethodForm)
                | (Screen::MethodForm, Screen::MethodSelection)
                | (Screen::MethodForm, Screen::Confirmation)
                | (Screen::MethodForm, Screen::Error)
                | (Screen::Error, Screen::MethodForm)
                | (Screen::Error, Screen::Landing)
                | (Screen::Confirmation, Screen::Landing)
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User or collaborator actions the flow reacts to
///
/// Used to name the rejected action when a transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAction {
    StartCheckout,
    SelectVariant,
    BackToSelection,
    Edit,
    Submit,
    ProcessingResult,
    Retry,
    Cancel,
    ContinueShopping,
}

impl FlowAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowAction::StartCheckout => "start",
            FlowAction::SelectVariant => "select",
            FlowAction::BackToSelection => "back",
            FlowAction::Edit => "edit",
            FlowAction::Submit => "submit",
            FlowAction::ProcessingResult => "result",
            FlowAction::Retry => "retry",
            FlowAction::Cancel => "cancel",
            FlowAction::ContinueShopping => "continue",
        }
    }
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
