//! Print layout: title, map with markers, legend.
//!
//! Hidden on screen; the stylesheet swaps it in for `@media print`.

use leptos::prelude::*;

use crate::components::map_canvas::marker_face;
use crate::components::pois_panel::Legend;
use crate::session::Session;
use crate::util::overlay::marker_style;

#[component]
pub fn PrintView() -> impl IntoView {
    let views = expect_context::<Session>().views;
    let print = move || views.with(|v| v.print.clone());

    view! {
        <section class="print-view" aria-hidden="true">
            <h1 class="print-view__title">{move || print().title}</h1>
            {move || {
                let projection = print();
                projection
                    .image_url
                    .map(|url| {
                        let markers = projection
                            .markers
                            .into_iter()
                            .map(|m| {
                                view! {
                                    <div class="marker marker--print" style=marker_style(m.x_pct, m.y_pct)>
                                        {marker_face(m.glyph, m.label)}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>();
                        view! {
                            <div class="print-view__stage">
                                <img class="print-view__image" src=url alt=""/>
                                <div class="print-view__overlay">{markers}</div>
                            </div>
                        }
                    })
            }}
            <Legend entries=Signal::derive(move || views.with(|v| v.print.legend.clone()))/>
        </section>
    }
}
