use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(Topbar)]
pub fn topbar() -> Html {
    html! {
        <nav class="flex items-center justify-between px-6 h-[50px] bg-dark-layer-1 text-dark-gray-7">
            <Link<Route> to={Route::Home} classes="text-lg font-semibold text-gray-300">
                { "Contest Calendar" }
            </Link<Route>>
            <Link<Route> to={Route::Contests} classes="text-gray-400 hover:text-white">
                { "Contests" }
            </Link<Route>>
        </nav>
    }
}
