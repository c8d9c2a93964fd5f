use super::SharedSampler;
use crate::kernel::dispatcher::{ActionHandler, HandlerError};
use crate::kernel::error::EngineError;
use crate::kernel::fallback::{ResponsePool, ResponsePools};
use crate::kernel::intent::ArgumentBundle;

pub fn greet(user: &str) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    let reply = format!("Hello {}. How can I help you?", user);
    move |_args| Ok(reply.clone())
}

/// Bound to `exit`. The session loop ends after speaking it.
pub fn farewell(
    user: &str,
) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    let reply = format!("Goodbye {}. Have a nice day!", user);
    move |_args| Ok(reply.clone())
}

pub struct JokeTeller {
    jokes: ResponsePool,
    sampler: SharedSampler,
}

impl JokeTeller {
    pub fn new(sampler: SharedSampler) -> Result<Self, EngineError> {
        Ok(Self {
            jokes: ResponsePools::jokes()?,
            sampler,
        })
    }

    pub fn jokes(&self) -> &ResponsePool {
        &self.jokes
    }
}

impl ActionHandler for JokeTeller {
    fn handle(&self, _args: &ArgumentBundle) -> Result<String, HandlerError> {
        let mut sampler = self
            .sampler
            .lock()
            .map_err(|_| HandlerError::Failed("sampler lock poisoned".to_string()))?;
        Ok(self.jokes.sample(&mut **sampler).to_string())
    }
}
