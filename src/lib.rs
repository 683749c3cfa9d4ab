pub mod command;
pub mod configure;
pub mod handler;

pub(crate) mod error;
pub(crate) mod executor;
pub(crate) mod param;

pub use command::{Command, Output};
pub use error::{Error, ExitTagged};
pub use executor::{execute, DEFAULT_EXIT_CODE, SUCCESS_EXIT_CODE};
pub use param::{ConfigureFn, ErrorHandlerFn, ExitCodeExtractorFn, Param};
