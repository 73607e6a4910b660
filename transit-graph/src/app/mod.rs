mod app_error;
mod operation;
mod transit_graph_app;

pub use app_error::AppError;
pub use operation::TransitGraphOperation;
pub use transit_graph_app::TransitGraphApp;
