use crate::datetime::format_start_time;
use shared::ContestRecord;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContestListProps {
    pub records: Vec<ContestRecord>,
}

/// Contests in the order they were classified; no re-sorting.
#[function_component(ContestList)]
pub fn contest_list(props: &ContestListProps) -> Html {
    html! {
        <ul class="space-y-4">
            { for props.records.iter().map(|record| html! {
                <li key={record.id.clone()} class="p-4 bg-dark-layer-1 rounded-lg shadow-md">
                    <h3 class="text-lg text-gray-300 font-semibold">{ record.name.clone() }</h3>
                    <p class="text-gray-400">{ record.contest_type.clone() }</p>
                    <p class="text-gray-400">{ format_start_time(record.start_time_seconds) }</p>
                </li>
            }) }
        </ul>
    }
}
