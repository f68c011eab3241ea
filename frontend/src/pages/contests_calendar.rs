use crate::api::contests::{fetch_contest_records, FetchError};
use crate::components::bucket_panel::BucketPanel;
use crate::components::nav::Topbar;
use crate::datetime::now_unix_seconds;
use log::{debug, error, info};
use shared::{Bucket, BucketExpansion, ContestBuckets, ContestRecord};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::AbortController;
use yew::prelude::*;

/// Expanded/collapsed sections, toggled through a reducer so clicks queued
/// before a re-render all apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpansionState(pub BucketExpansion);

pub enum ExpansionAction {
    Toggle(Bucket),
}

impl Reducible for ExpansionState {
    type Action = ExpansionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ExpansionAction::Toggle(bucket) => Rc::new(ExpansionState(self.0.toggled(bucket))),
        }
    }
}

/// What the page stores once the fetch settles. `None` leaves the state
/// untouched: the page was unmounted, or the fetch failed and the lists stay
/// empty.
pub fn next_buckets(
    result: Result<Vec<ContestRecord>, FetchError>,
    cancelled: bool,
    now: i64,
) -> Option<ContestBuckets> {
    if cancelled {
        debug!("Contests page unmounted before the fetch finished; discarding result");
        return None;
    }

    match result {
        Ok(records) => {
            let classified = ContestBuckets::classify_all(records, now);
            info!(
                "Loaded contests: {} current, {} upcoming, {} past",
                classified.current.len(),
                classified.upcoming.len(),
                classified.past.len()
            );
            Some(classified)
        }
        Err(FetchError::Aborted) => {
            debug!("Contest fetch aborted");
            None
        }
        Err(e) => {
            error!("Error fetching contests: {}", e);
            None
        }
    }
}

/// Contest calendar page: one fetch on mount, classified into current,
/// upcoming and past, each shown as a collapsible list.
///
/// A failed fetch is only logged; the lists stay empty and nothing
/// distinguishes "still loading" from "nothing to show".
#[function_component(ContestsCalendar)]
pub fn contests_calendar() -> Html {
    let buckets = use_state(ContestBuckets::default);
    let expansion = use_reducer(ExpansionState::default);

    // Fetch once on mount; unmounting aborts the request and drops a late result
    {
        let buckets = buckets.clone();
        use_effect_with((), move |_| {
            let controller = match AbortController::new() {
                Ok(controller) => Some(controller),
                Err(e) => {
                    debug!("AbortController unavailable: {:?}", e);
                    None
                }
            };
            let signal = controller.as_ref().map(|c| c.signal());
            let cancelled = Rc::new(Cell::new(false));

            {
                let cancelled = cancelled.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = fetch_contest_records(signal.as_ref()).await;
                    if let Some(classified) = next_buckets(result, cancelled.get(), now_unix_seconds()) {
                        buckets.set(classified);
                    }
                });
            }

            move || {
                cancelled.set(true);
                if let Some(controller) = controller {
                    controller.abort();
                }
            }
        });
    }

    let on_toggle = {
        let expansion = expansion.clone();
        Callback::from(move |bucket: Bucket| {
            expansion.dispatch(ExpansionAction::Toggle(bucket));
        })
    };

    html! {
        <main class="bg-dark-layer-2 min-h-screen">
            <Topbar />
            <h1 class="text-2xl text-center text-gray-700 dark:text-gray-400 font-medium uppercase mt-10 mb-5">
                { "Contests Calendar" }
            </h1>
            <div class="relative overflow-x-auto mx-auto px-6 pb-10 max-w-[1200px] sm:w-7/12 w-full">
                { for Bucket::ALL.iter().map(|bucket| html! {
                    <BucketPanel
                        key={bucket.to_string()}
                        bucket={*bucket}
                        records={buckets.get(*bucket).to_vec()}
                        expanded={expansion.0.is_expanded(*bucket)}
                        on_toggle={on_toggle.clone()}
                    />
                }) }
            </div>
        </main>
    }
}
