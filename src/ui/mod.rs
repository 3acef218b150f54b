pub mod app;
pub mod chapter_list;
pub mod fullscreen;
pub mod seek_bar;
pub mod video_player;
