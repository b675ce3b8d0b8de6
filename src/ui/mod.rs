pub mod app;
pub mod cart_panel;
pub mod catalog_view;
pub mod player_bar;
pub mod props;
