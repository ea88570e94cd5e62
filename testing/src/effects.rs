//! Resolve effect descriptions without a store.
//!
//! Reducer tests usually want to know which actions an effect tree would
//! feed back. [`drain_effects`] runs the tree to completion on the current
//! task and returns those actions, skipping delays.

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use mentor_club_core::effect::Effect;

/// Run every effect and collect the actions they produce.
///
/// `Sequential` children keep their order. `Parallel` children run
/// concurrently and their actions are returned in declaration order.
/// `Delay` yields its action immediately.
pub async fn drain_effects<A, I>(effects: I) -> Vec<A>
where
    A: Send + 'static,
    I: IntoIterator<Item = Effect<A>>,
{
    let mut actions = Vec::new();
    for effect in effects {
        actions.extend(drain_one(effect).await);
    }
    actions
}

fn drain_one<A>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>>
where
    A: Send + 'static,
{
    async move {
        match effect {
            Effect::None => Vec::new(),
            Effect::Future(fut) => fut.await.into_iter().collect(),
            Effect::Delay { action, .. } => vec![*action],
            Effect::Parallel(effects) => join_all(effects.into_iter().map(drain_one))
                .await
                .into_iter()
                .flatten()
                .collect(),
            Effect::Sequential(effects) => {
                let mut actions = Vec::new();
                for effect in effects {
                    actions.extend(drain_one(effect).await);
                }
                actions
            },
        }
    }
    .boxed()
}
