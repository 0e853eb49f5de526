mod bar;
mod code_preview;
mod complete;
mod confirm;
mod footer;
mod header;
mod icons;
mod layout;
mod progress;
mod review;
mod theme;

pub use complete::CompleteView;
pub use confirm::ConfirmView;
pub use footer::Footer;
pub use header::Header;
pub use layout::AppLayout;
pub use progress::{LoadingView, ProgressView};
pub use review::ReviewView;
pub use theme::Theme;
