mod formatter_factory;
mod presenter_factory;

pub use formatter_factory::ReportFormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
