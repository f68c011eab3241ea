use crate::components::contest_list::ContestList;
use shared::{Bucket, ContestRecord};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BucketPanelProps {
    pub bucket: Bucket,
    pub records: Vec<ContestRecord>,
    pub expanded: bool,
    pub on_toggle: Callback<Bucket>,
}

/// Clickable bucket header; the list underneath only renders while expanded.
#[function_component(BucketPanel)]
pub fn bucket_panel(props: &BucketPanelProps) -> Html {
    let onclick = {
        let on_toggle = props.on_toggle.clone();
        let bucket = props.bucket;
        Callback::from(move |_: MouseEvent| on_toggle.emit(bucket))
    };

    html! {
        <div class="mb-4" data-bucket={props.bucket.to_string()}>
            <div
                class="bg-dark-layer-1 p-4 rounded-lg shadow-lg cursor-pointer"
                aria-expanded={props.expanded.to_string()}
                {onclick}
            >
                <h2 class="text-xl text-gray-300">{ props.bucket.title() }</h2>
            </div>
            if props.expanded {
                <div class="bg-dark-layer-1 p-4 rounded-lg shadow-lg mt-2">
                    <ContestList records={props.records.clone()} />
                </div>
            }
        </div>
    }
}
