use bootgate_lib::GateRuntime;
use gate_core::config::AppConfig;
use gate_core::ports::RouterPort;
use gate_core::{GateState, ReadinessSource, Route};
use gate_infra::AppPaths;
use tempfile::TempDir;

async fn launch(dir: &TempDir, route: &str) -> (GateRuntime, gate_app::usecases::NavigationGateWatcher) {
    let runtime = GateRuntime::build(
        &AppConfig::empty(),
        AppPaths::from_data_dir(dir.path().to_path_buf()),
        route,
    );
    runtime.readiness.mark_ready(ReadinessSource::Fonts);
    runtime.bootstrap_sequencer().run().await.unwrap();
    let mut gate = runtime.gate_watcher();
    gate.settle().await;
    (runtime, gate)
}

#[tokio::test]
async fn anonymous_sign_in_survives_relaunch() {
    let dir = TempDir::new().unwrap();

    let (runtime, mut gate) = launch(&dir, "/").await;
    assert_eq!(runtime.router.current_path(), Route::Welcome.path());
    assert!(runtime.readiness.is_ready());

    let identity_id = runtime.issue_anonymous_session().execute().await.unwrap();
    gate.settle().await;
    assert_eq!(runtime.router.current_path(), Route::Onboarding.path());

    runtime.complete_onboarding().execute().await.unwrap();
    drop(gate);
    drop(runtime);

    let (runtime, gate) = launch(&dir, Route::Welcome.path()).await;
    assert_eq!(gate.state(), Some(GateState::Ready));
    assert_eq!(runtime.router.current_path(), Route::Main.path());
    assert_eq!(
        runtime.session.snapshot().identity_id(),
        Some(&identity_id)
    );
    // Replace-only navigation: the launch entry was swapped, not pushed over.
    assert_eq!(runtime.router.history(), vec![Route::Main.path()]);
}

#[tokio::test]
async fn sign_out_forgets_session_across_relaunch() {
    let dir = TempDir::new().unwrap();

    let (runtime, mut gate) = launch(&dir, "/").await;
    runtime.issue_anonymous_session().execute().await.unwrap();
    runtime.complete_onboarding().execute().await.unwrap();
    runtime.sign_out().execute().await.unwrap();
    gate.settle().await;
    assert_eq!(runtime.router.current_path(), Route::Welcome.path());
    drop(gate);
    drop(runtime);

    let (runtime, gate) = launch(&dir, "/(tabs)/home").await;
    assert_eq!(gate.state(), Some(GateState::Unauthenticated));
    assert_eq!(runtime.router.current_path(), Route::Welcome.path());
}

#[tokio::test]
async fn reminder_dismissal_is_persisted() {
    let dir = TempDir::new().unwrap();

    let (runtime, _gate) = launch(&dir, "/").await;
    assert!(!runtime.gender_reminder_status().execute().await);
    runtime.dismiss_gender_reminder().execute().await.unwrap();
    drop(runtime);

    let (runtime, _gate) = launch(&dir, "/").await;
    assert!(runtime.gender_reminder_status().execute().await);
}
