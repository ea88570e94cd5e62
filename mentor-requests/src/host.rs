//! Drives a page against a live store.
//!
//! [`run_page`] is the page's single execution context: every render,
//! interaction and lifecycle transition happens on the task that awaits it.

use crate::actions::MentorRequestsAction;
use crate::environment::MentorRequestsEnvironment;
use crate::navigation::Navigator;
use crate::page::{MentorRequestCreationPage, PageError, SubmissionStatus};
use crate::selectors::PageSnapshot;
use crate::types::MentorRequestsState;
use crate::view::{MentorRequestCreationView, ViewEvent};
use mentor_club_core::dispatch::Dispatch;
use mentor_club_core::reducer::Reducer;
use mentor_club_runtime::Store;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// How long [`run_page`] waits for the store to apply the unmount clear
pub const CLEAR_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Mount `page`, keep `view` rendered until the page navigates away or
/// `events` closes, then unmount.
///
/// Renders once after mounting, after every store state change and after
/// every view event. A pending state change is rendered before a pending
/// event, so events are handled against the freshest mentor list.
///
/// Returns only once the store no longer holds a new request id, so a page
/// mounted right afterwards starts from a cleared id. The page is unmounted
/// on every exit path, including errors and cancellation.
///
/// # Errors
///
/// Returns [`PageError`] if `page` was already mounted or torn down.
#[tracing::instrument(skip_all, name = "mentor_request_page")]
pub async fn run_page<R, D, N, V>(
    store: &Store<MentorRequestsState, MentorRequestsAction, MentorRequestsEnvironment, R>,
    page: &mut MentorRequestCreationPage<D, N>,
    view: &mut V,
    mut events: mpsc::Receiver<ViewEvent>,
) -> Result<SubmissionStatus, PageError>
where
    R: Reducer<
            State = MentorRequestsState,
            Action = MentorRequestsAction,
            Environment = MentorRequestsEnvironment,
        > + Clone
        + Send
        + Sync
        + 'static,
    D: Dispatch<MentorRequestsAction>,
    N: Navigator,
    V: MentorRequestCreationView,
{
    let mut state_changes = store.subscribe_state();
    page.mount()?;
    let mut mounted = MountGuard { page };
    render(store, &mut *mounted.page, view).await?;

    while mounted.page.submission() != SubmissionStatus::Navigated {
        tokio::select! {
            biased;
            changed = state_changes.changed() => {
                if changed.is_err() {
                    tracing::debug!("Store dropped, leaving page");
                    break;
                }
            },
            event = events.recv() => match event {
                Some(event) => {
                    tracing::trace!(?event, "View event");
                    mounted.page.handle(event)?;
                },
                None => {
                    tracing::debug!("View closed, leaving page");
                    break;
                },
            },
        }
        render(store, &mut *mounted.page, view).await?;
    }

    mounted.page.unmount()?;
    wait_for_cleared_id(store, &mut state_changes).await;
    Ok(mounted.page.submission())
}

/// Unmounts the page when dropped while it is still mounted
struct MountGuard<'a, D, N>
where
    D: Dispatch<MentorRequestsAction>,
    N: Navigator,
{
    page: &'a mut MentorRequestCreationPage<D, N>,
}

impl<D, N> Drop for MountGuard<'_, D, N>
where
    D: Dispatch<MentorRequestsAction>,
    N: Navigator,
{
    fn drop(&mut self) {
        if self.page.phase().is_mounted() {
            tracing::debug!("Page left early, unmounting");
            if let Err(error) = self.page.unmount() {
                tracing::warn!(%error, "Unmount on early exit failed");
            }
        }
    }
}

/// Wait until the store has applied the clear dispatched by `unmount`
async fn wait_for_cleared_id<R>(
    store: &Store<MentorRequestsState, MentorRequestsAction, MentorRequestsEnvironment, R>,
    state_changes: &mut watch::Receiver<u64>,
) where
    R: Reducer<
            State = MentorRequestsState,
            Action = MentorRequestsAction,
            Environment = MentorRequestsEnvironment,
        > + Clone
        + Send
        + Sync
        + 'static,
{
    let cleared = tokio::time::timeout(CLEAR_SETTLE_TIMEOUT, async {
        while store.state(|s| s.new_mentor_request_id.is_some()).await {
            if state_changes.changed().await.is_err() {
                return false;
            }
        }
        true
    })
    .await
    .unwrap_or(false);

    if !cleared {
        tracing::warn!("Store did not clear the new request id after unmount");
    }
}

async fn render<R, D, N, V>(
    store: &Store<MentorRequestsState, MentorRequestsAction, MentorRequestsEnvironment, R>,
    page: &mut MentorRequestCreationPage<D, N>,
    view: &mut V,
) -> Result<(), PageError>
where
    R: Reducer<
            State = MentorRequestsState,
            Action = MentorRequestsAction,
            Environment = MentorRequestsEnvironment,
        > + Clone
        + Send
        + Sync
        + 'static,
    D: Dispatch<MentorRequestsAction>,
    N: Navigator,
    V: MentorRequestCreationView,
{
    let snapshot = store.state(PageSnapshot::select).await;
    let props = page.render(snapshot)?;
    view.render(&props);
    Ok(())
}
