pub mod contact_form;
pub mod error_panel;
pub mod layout;
pub mod restaurant_card;
pub mod review_form;
pub mod reviews_list;
