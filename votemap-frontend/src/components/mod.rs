mod click_modal;
mod floating_search;
mod loader;
mod map;
mod multi_select;
mod search;
mod toasts;
mod vote_form;

pub use self::{
    click_modal::*, floating_search::*, loader::*, map::*, multi_select::*, search::*, toasts::*,
    vote_form::*,
};
