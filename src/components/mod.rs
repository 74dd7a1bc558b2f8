pub mod dialogs;
pub mod notifications;
pub mod palette;
pub mod tools;
