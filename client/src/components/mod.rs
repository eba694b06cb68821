pub mod base_maps_panel;
pub mod categories_panel;
pub mod event_maps_panel;
pub mod map_canvas;
pub mod name_dialog;
pub mod pois_panel;
pub mod print_view;
pub mod tab_bar;
pub mod toolbar;
