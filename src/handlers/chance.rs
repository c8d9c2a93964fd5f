use super::SharedSampler;
use crate::kernel::dispatcher::HandlerError;
use crate::kernel::intent::ArgumentBundle;

const DEFAULT_SIDES: i64 = 6;

pub fn coin_toss(
    sampler: SharedSampler,
) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    move |_args| {
        let mut sampler = sampler
            .lock()
            .map_err(|_| HandlerError::Failed("sampler lock poisoned".to_string()))?;
        let face = if sampler.pick(2) == 0 { "heads" } else { "tails" };
        Ok(format!("I flipped a coin and got: {}", face))
    }
}

/// `sides` is optional and defaults to six.
pub fn roll_dice(
    sampler: SharedSampler,
) -> impl Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync {
    move |args| {
        let sides = match args.get("sides") {
            Some(_) => super::int_slot(args, "sides")?,
            None => DEFAULT_SIDES,
        };
        if sides < 2 {
            return Err(HandlerError::Failed("A dice must have at least 2 sides.".to_string()));
        }

        let faces = usize::try_from(sides).map_err(|_| HandlerError::InvalidArgument {
            slot: "sides".to_string(),
            value: sides.to_string(),
        })?;
        let mut sampler = sampler
            .lock()
            .map_err(|_| HandlerError::Failed("sampler lock poisoned".to_string()))?;
        let result = sampler.pick(faces) + 1;
        Ok(format!("I rolled a {}-sided dice and got: {}", sides, result))
    }
}
