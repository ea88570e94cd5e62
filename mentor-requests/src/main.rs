//! Scripted session on the mentor request creation page.
//!
//! Opens the page, waits for the mentor list, picks the first mentor, types
//! a description and submits. The page navigates to the created request and
//! the final frame and history are printed.
//!
//! # Running
//!
//! ```bash
//! # In-process backend
//! cargo run -p mentor-requests
//!
//! # Real backend, sending the typed form instead of a placeholder
//! MENTOR_CLUB_API_URL=http://localhost:8080/api \
//! MENTOR_CLUB_SUBMIT_COLLECTED_INPUT=true \
//! cargo run -p mentor-requests
//! ```

use anyhow::Context;
use mentor_club_core::environment::SystemClock;
use mentor_club_runtime::{Store, StoreDispatcher};
use mentor_requests::{
    AppConfig, History, HttpMentorRequestsApi, InMemoryMentorRequestsApi, InputEvent,
    MentorRequestCreationPage, MentorRequestsAction, MentorRequestsApi, MentorRequestsEnvironment,
    MentorRequestsReducer, MentorRequestsState, TextView, User, UserId, ViewEvent, run_page,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type MentorRequestsStore =
    Store<MentorRequestsState, MentorRequestsAction, MentorRequestsEnvironment, MentorRequestsReducer>;

const SCRIPT_STEP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let api: Arc<dyn MentorRequestsApi> = match &config.api_url {
        Some(url) => {
            tracing::info!(%url, "Using HTTP backend");
            Arc::new(HttpMentorRequestsApi::new(url.clone()))
        },
        None => {
            tracing::info!("Using in-process backend");
            Arc::new(InMemoryMentorRequestsApi::with_mentors(demo_mentors()))
        },
    };

    let store = Store::new(
        MentorRequestsState::new(),
        MentorRequestsReducer::new(),
        MentorRequestsEnvironment::new(api, Arc::new(SystemClock)),
    );
    let dispatcher = StoreDispatcher::spawn(store.clone());
    let history = History::new("/mentor-requests/new");
    let mut page =
        MentorRequestCreationPage::with_config(dispatcher.clone(), history.clone(), config.page.clone());
    let mut view = TextView::new();

    let (events, rx) = mpsc::channel(16);
    let user = tokio::spawn(scripted_user(store.clone(), events));

    let status = run_page(&store, &mut page, &mut view, rx).await?;
    tracing::info!(?status, "Page closed");
    user.await.context("scripted user panicked")?;

    dispatcher.flush().await;
    store.shutdown(config.shutdown_timeout).await?;

    if let Some(frame) = view.last_frame() {
        println!("{frame}");
    }
    println!("History: {}", history.entries().join(" -> "));
    Ok(())
}

/// Acts like a user: waits for the mentor list, fills in the form and
/// submits, then stays on the page until the outcome is known.
async fn scripted_user(store: MentorRequestsStore, events: mpsc::Sender<ViewEvent>) {
    let loaded = wait_until(&store, |s| s.mentors_fetched_at.is_some() || s.last_error.is_some()).await;
    if !loaded {
        tracing::warn!("Mentor list never arrived");
        return;
    }

    let first_mentor = store.state(|s| s.mentors.first().map(|m| m.id.clone())).await;
    let script = [
        ViewEvent::SelectMentor(first_mentor),
        ViewEvent::DescriptionChanged(InputEvent::new("Need help structuring a Rust workspace")),
        ViewEvent::Submit,
    ];
    for event in script {
        if events.send(event).await.is_err() {
            return;
        }
    }

    let settled = wait_until(&store, |s| {
        s.new_mentor_request_id.is_some() || (!s.is_creating_request && s.last_error.is_some())
    })
    .await;
    if !settled {
        tracing::warn!("No outcome for the submitted request");
    }
}

/// Wait until `predicate` holds for the store's state
async fn wait_until<F>(store: &MentorRequestsStore, predicate: F) -> bool
where
    F: Fn(&MentorRequestsState) -> bool,
{
    let mut versions = store.subscribe_state();
    tokio::time::timeout(SCRIPT_STEP_TIMEOUT, async {
        loop {
            if store.state(&predicate).await {
                return true;
            }
            if versions.changed().await.is_err() {
                return false;
            }
        }
    })
    .await
    .unwrap_or(false)
}

fn demo_mentors() -> Vec<User> {
    vec![
        User::new(UserId::new("1"), "Grace Hopper", "grace"),
        User::new(UserId::new("2"), "Alan Kay", "alan"),
        User::new(UserId::new("3"), "Barbara Liskov", "barbara"),
    ]
}
