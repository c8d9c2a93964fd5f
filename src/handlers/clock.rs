use std::sync::Arc;

use crate::kernel::dispatcher::HandlerError;
use crate::kernel::intent::ArgumentBundle;
use crate::kernel::time::{spoken_date, spoken_time, Clock};

pub fn tell_time(
    clock: Arc<dyn Clock>,
) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    move |_args| Ok(spoken_time(clock.as_ref()))
}

pub fn tell_date(
    clock: Arc<dyn Clock>,
) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    move |_args| Ok(spoken_date(clock.as_ref()))
}
