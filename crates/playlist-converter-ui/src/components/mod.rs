//! UI components.

pub mod conversion_form;
pub mod conversion_view;
pub mod home;
pub mod loading;
pub mod login_panel;
pub mod redirect;

pub use conversion_form::ConversionForm;
pub use conversion_view::ConversionView;
pub use home::{HomeScreen, HomeView, NEW_BADGE_MS};
pub use loading::{LoadingIndicator, LoadingOverlay, Spinner};
pub use login_panel::LoginPanel;
pub use redirect::RedirectScreen;
