pub mod confirm_dialog;
pub mod member_form;

pub use confirm_dialog::ConfirmDialog;
pub use member_form::MemberFormModal;
