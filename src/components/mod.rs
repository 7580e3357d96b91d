//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod edit_modal;
mod error_banner;
mod login_form;
mod mission_card;
mod mission_column;
mod navbar;
mod new_mission_form;
mod toast_host;

pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_modal::EditModal;
pub use error_banner::ErrorBanner;
pub use login_form::LoginForm;
pub use mission_card::MissionCard;
pub use mission_column::MissionColumn;
pub use navbar::Navbar;
pub use new_mission_form::NewMissionForm;
pub use toast_host::ToastHost;
