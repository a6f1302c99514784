//! Business logic use cases
//!
//! 启动引导、会话与导航门控的用例集合。

pub mod bootstrap;
pub mod navigation;
pub mod onboarding;
pub mod session;

pub use bootstrap::{BootstrapReport, BootstrapSequencer, BootstrapSequencerDeps};
pub use navigation::{NavigationGateWatcher, NavigationGateWatcherDeps, OnboardingSignal};
pub use onboarding::{CompleteOnboarding, DismissGenderReminder, GenderReminderStatus};
pub use session::{EstablishSession, IssueAnonymousSession, SessionError, SignOut};
