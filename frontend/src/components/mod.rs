pub mod bucket_panel;
pub mod contest_list;
pub mod nav;
