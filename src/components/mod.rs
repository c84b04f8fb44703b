pub mod confirm_modal;
pub mod container_list;
pub mod detail_view;
pub mod filter_bar;
pub mod form_modal;
pub mod header;
pub mod image_list;
pub mod message_modal;
pub mod row_table;
pub mod search_results;
pub mod status_bar;
pub mod task_list;
pub mod text_input;

pub use confirm_modal::ConfirmModal;
pub use container_list::ContainerList;
pub use detail_view::DetailView;
pub use filter_bar::{FilterBar, FilterEvent};
pub use form_modal::{Form, FormEvent, Validator};
pub use header::Header;
pub use image_list::ImageList;
pub use message_modal::{ErrorModal, StateModal};
pub use search_results::{SearchEvent, SearchResults};
pub use status_bar::StatusBar;
pub use task_list::TaskList;
pub use text_input::{Editable, TextInput};
