mod insights_panel;
mod task_form;
mod task_item;
mod task_list;

pub use insights_panel::InsightsPanel;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskList;
