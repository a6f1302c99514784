//! Navigation gate state machine.
//!
//! Defines a pure decision function from a consistent input snapshot to a
//! gate state and at most one redirect.

use serde::{Deserialize, Serialize};

use super::route::{Route, RouteGroup};

/// Progress of the onboarding-flag read for the current identity.
///
/// 当前身份的引导完成标记读取进度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnboardingCheck {
    /// Read not yet finished for the current identity.
    ///
    /// 尚未读取。
    Pending,
    /// No identity present, nothing to read.
    ///
    /// 无身份，无需读取。
    NotRequired,
    /// Read finished.
    ///
    /// 已读取。
    Checked { completed: bool },
}

impl OnboardingCheck {
    /// Whether the check counts as settled for the given identity presence.
    pub fn is_settled(&self, identity_present: bool) -> bool {
        match self {
            OnboardingCheck::Pending => false,
            OnboardingCheck::NotRequired => !identity_present,
            OnboardingCheck::Checked { .. } => true,
        }
    }

    pub fn completed(&self) -> Option<bool> {
        match self {
            OnboardingCheck::Checked { completed } => Some(*completed),
            _ => None,
        }
    }
}

/// Snapshot of every input the gate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateInputs {
    pub is_loading: bool,
    pub identity_present: bool,
    pub onboarding: OnboardingCheck,
    pub route_group: RouteGroup,
}

/// Derived gate state.
///
/// 门控状态（派生值，不存储）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateState {
    Checking,
    Unauthenticated,
    NeedsOnboarding,
    Ready,
}

/// Navigation action produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateDecision {
    /// Inputs still settling, defer.
    Await,
    GoWelcome,
    GoOnboarding,
    GoMain,
    /// Settled, already in the right place.
    None,
}

impl GateDecision {
    pub fn target(&self) -> Option<Route> {
        match self {
            GateDecision::GoWelcome => Some(Route::Welcome),
            GateDecision::GoOnboarding => Some(Route::Onboarding),
            GateDecision::GoMain => Some(Route::Main),
            GateDecision::Await | GateDecision::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub state: GateState,
    pub decision: GateDecision,
}

impl GateOutcome {
    fn new(state: GateState, decision: GateDecision) -> Self {
        Self { state, decision }
    }
}

/// Pure navigation gate.
///
/// 纯状态机：不包含副作用。
pub struct GateStateMachine;

impl GateStateMachine {
    pub fn decide(inputs: &GateInputs) -> GateOutcome {
        let GateInputs {
            is_loading,
            identity_present,
            onboarding,
            route_group,
        } = *inputs;

        if is_loading || !onboarding.is_settled(identity_present) {
            return GateOutcome::new(GateState::Checking, GateDecision::Await);
        }

        if !identity_present {
            let decision = if route_group.is_auth_flow() {
                GateDecision::None
            } else {
                GateDecision::GoWelcome
            };
            return GateOutcome::new(GateState::Unauthenticated, decision);
        }

        let completed = onboarding.completed().unwrap_or(false);
        let state = if completed {
            GateState::Ready
        } else {
            GateState::NeedsOnboarding
        };

        // Outside the auth group the calling screens own the
        // onboarding/main distinction; no forced bounce.
        let decision = match (route_group.is_auth_flow(), completed) {
            (true, true) => GateDecision::GoMain,
            (true, false) => GateDecision::GoOnboarding,
            (false, _) => GateDecision::None,
        };

        GateOutcome::new(state, decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        is_loading: bool,
        identity_present: bool,
        onboarding: OnboardingCheck,
        route_group: RouteGroup,
    ) -> GateInputs {
        GateInputs {
            is_loading,
            identity_present,
            onboarding,
            route_group,
        }
    }

    #[test]
    fn gate_defers_while_loading() {
        let outcome = GateStateMachine::decide(&inputs(
            true,
            false,
            OnboardingCheck::NotRequired,
            RouteGroup::Other,
        ));
        assert_eq!(outcome.state, GateState::Checking);
        assert_eq!(outcome.decision, GateDecision::Await);
    }

    #[test]
    fn gate_defers_while_onboarding_read_pending() {
        let outcome = GateStateMachine::decide(&inputs(
            false,
            true,
            OnboardingCheck::Pending,
            RouteGroup::AuthFlow,
        ));
        assert_eq!(outcome.decision, GateDecision::Await);
    }

    #[test]
    fn gate_treats_stale_not_required_as_unsettled_when_identity_present() {
        let outcome = GateStateMachine::decide(&inputs(
            false,
            true,
            OnboardingCheck::NotRequired,
            RouteGroup::AuthFlow,
        ));
        assert_eq!(outcome.state, GateState::Checking);
    }

    #[test]
    fn gate_sends_anonymous_visitor_to_welcome() {
        let outcome = GateStateMachine::decide(&inputs(
            false,
            false,
            OnboardingCheck::NotRequired,
            RouteGroup::Main,
        ));
        assert_eq!(outcome.state, GateState::Unauthenticated);
        assert_eq!(outcome.decision, GateDecision::GoWelcome);
    }

    #[test]
    fn gate_leaves_visitor_inside_auth_flow() {
        let outcome = GateStateMachine::decide(&inputs(
            false,
            false,
            OnboardingCheck::NotRequired,
            RouteGroup::AuthFlow,
        ));
        assert_eq!(outcome.state, GateState::Unauthenticated);
        assert_eq!(outcome.decision, GateDecision::None);
    }

    #[test]
    fn gate_routes_identity_out_of_auth_flow() {
        let to_onboarding = GateStateMachine::decide(&inputs(
            false,
            true,
            OnboardingCheck::Checked { completed: false },
            RouteGroup::AuthFlow,
        ));
        assert_eq!(to_onboarding.state, GateState::NeedsOnboarding);
        assert_eq!(to_onboarding.decision, GateDecision::GoOnboarding);

        let to_main = GateStateMachine::decide(&inputs(
            false,
            true,
            OnboardingCheck::Checked { completed: true },
            RouteGroup::AuthFlow,
        ));
        assert_eq!(to_main.state, GateState::Ready);
        assert_eq!(to_main.decision, GateDecision::GoMain);
    }

    #[test]
    fn gate_does_not_bounce_between_onboarding_and_main() {
        for group in [RouteGroup::Onboarding, RouteGroup::Main, RouteGroup::Other] {
            for completed in [false, true] {
                let outcome = GateStateMachine::decide(&inputs(
                    false,
                    true,
                    OnboardingCheck::Checked { completed },
                    group,
                ));
                assert_eq!(outcome.decision, GateDecision::None, "{group:?} {completed}");
            }
        }
    }

    #[test]
    fn gate_never_targets_the_group_it_is_in() {
        let checks = [
            OnboardingCheck::Pending,
            OnboardingCheck::NotRequired,
            OnboardingCheck::Checked { completed: false },
            OnboardingCheck::Checked { completed: true },
        ];
        let groups = [
            RouteGroup::AuthFlow,
            RouteGroup::Onboarding,
            RouteGroup::Main,
            RouteGroup::Other,
        ];

        for is_loading in [false, true] {
            for identity_present in [false, true] {
                for onboarding in checks {
                    for route_group in groups {
                        let outcome = GateStateMachine::decide(&inputs(
                            is_loading,
                            identity_present,
                            onboarding,
                            route_group,
                        ));
                        if let Some(target) = outcome.decision.target() {
                            assert_ne!(target.group(), route_group);
                        }
                    }
                }
            }
        }
    }
}
